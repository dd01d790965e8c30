pub mod builder;
pub mod cli;
pub mod codegen;
pub mod schema;
pub mod tag;

fn setup_logger(level: log::LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .level(level)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{date} [{level}] {message}",
                date = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
                level = record.level(),
                message = message,
            ));
        })
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn real_main() -> anyhow::Result<()> {
    let command_line_interface = cli::CommandLineInterface::load();
    setup_logger(command_line_interface.log_level())?;
    command_line_interface.run()
}

fn main() {
    match real_main() {
        Ok(()) => {}
        Err(e) => {
            log::error!("{e:#}");
            std::process::exit(1);
        }
    }
}
