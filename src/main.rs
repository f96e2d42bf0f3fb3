fn main() {
    if let Err(err) = workstudy_lib::run() {
        log::error!("workstudy failed: {err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
