use flexi_logger::DeferredNow;
use log::Record;

/// `HH:MM:SS LEVEL target: message`, one line per record.
pub fn cli_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {:<5} {}: {}",
        now.format("%H:%M:%S"),
        record.level(),
        record.target(),
        record.args()
    )
}
