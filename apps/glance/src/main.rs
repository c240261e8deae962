fn main() {
    if let Err(e) = glance_lib::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
