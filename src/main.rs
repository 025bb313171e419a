fn main() {
    env_logger::init();

    if let Err(error) = sysreport::write_report(sysreport::REPORT_FILE_NAME) {
        eprintln!("sysreport: {error}");
        std::process::exit(1);
    }
}
