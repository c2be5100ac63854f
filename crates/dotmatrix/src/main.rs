fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = dotmatrix::parse_args(std::env::args().skip(1))?;
    log::info!("running {} for {} frames", options.rom.display(), options.frames);
    dotmatrix::run(&options)?;
    Ok(())
}
