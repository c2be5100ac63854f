use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use dotmatrix_common::Color;
use dotmatrix_gb::{Cartridge, GameBoy, GameBoyConfig, RenderMode, SCREEN_HEIGHT, SCREEN_WIDTH};

pub const USAGE: &str = "usage: dotmatrix <rom> [--frames N] [--out PATH] [--boot PATH] \
[--mode normal|tiles|tiles-high|map|map-high] [--trace]";

const DEFAULT_FRAMES: u32 = 60;
const DEFAULT_OUT: &str = "frame.ppm";

/// What a headless run does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub rom: PathBuf,
    pub frames: u32,
    pub out: PathBuf,
    pub boot: Option<PathBuf>,
    pub render_mode: RenderMode,
    pub trace: bool,
}

impl RunOptions {
    pub fn new(rom: impl Into<PathBuf>) -> Self {
        Self {
            rom: rom.into(),
            frames: DEFAULT_FRAMES,
            out: PathBuf::from(DEFAULT_OUT),
            boot: None,
            render_mode: RenderMode::Normal,
            trace: false,
        }
    }
}

pub fn parse_render_mode(name: &str) -> Result<RenderMode> {
    let mode = match name {
        "normal" => RenderMode::Normal,
        "tiles" => RenderMode::TileSheet { high_block: false },
        "tiles-high" => RenderMode::TileSheet { high_block: true },
        "map" => RenderMode::TileMap { high_map: false },
        "map-high" => RenderMode::TileMap { high_map: true },
        other => bail!("unknown render mode '{other}'"),
    };
    Ok(mode)
}

/// Parse the arguments after the program name.
pub fn parse_args<I>(args: I) -> Result<RunOptions>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut rom = None;
    let mut options = RunOptions::new("");

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| anyhow!("{flag} needs a value\n{USAGE}"))
        };
        match arg.as_str() {
            "--frames" => {
                let frames = value("--frames")?;
                options.frames = frames
                    .parse()
                    .with_context(|| format!("invalid frame count '{frames}'"))?;
            }
            "--out" => options.out = PathBuf::from(value("--out")?),
            "--boot" => options.boot = Some(PathBuf::from(value("--boot")?)),
            "--mode" => options.render_mode = parse_render_mode(&value("--mode")?)?,
            "--trace" => options.trace = true,
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n{USAGE}"),
            path if rom.is_none() => rom = Some(PathBuf::from(path)),
            extra => bail!("unexpected argument '{extra}'\n{USAGE}"),
        }
    }

    options.rom = rom.ok_or_else(|| anyhow!("no ROM given\n{USAGE}"))?;
    Ok(options)
}

/// Write `canvas` as a binary (P6) PPM image.
pub fn write_ppm<W: Write>(mut writer: W, canvas: &[Color], width: usize, height: usize) -> io::Result<()> {
    write!(writer, "P6\n{width} {height}\n255\n")?;
    for color in canvas.iter().take(width * height) {
        let (r, g, b) = color.rgb();
        writer.write_all(&[r, g, b])?;
    }
    writer.flush()
}

fn load_session(options: &RunOptions) -> Result<GameBoy> {
    let boot_rom = match &options.boot {
        Some(path) => Some(
            fs::read(path).with_context(|| format!("failed to read boot ROM {}", path.display()))?,
        ),
        None => None,
    };
    let config = GameBoyConfig {
        boot_rom,
        trace: options.trace,
        render_mode: options.render_mode,
    };
    let mut gb = GameBoy::new(config).context("failed to start the emulator")?;

    let rom = fs::read(&options.rom)
        .with_context(|| format!("failed to read ROM {}", options.rom.display()))?;
    let cartridge = Cartridge::from_bytes(rom)
        .with_context(|| format!("{} is not a usable cartridge", options.rom.display()))?;
    gb.load_cartridge(cartridge);
    Ok(gb)
}

fn save_frame(path: &Path, canvas: &[Color]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_ppm(BufWriter::new(file), canvas, SCREEN_WIDTH, SCREEN_HEIGHT)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Run the configured number of frames and save the last canvas.
///
/// Returns the session so callers can inspect it afterwards.
pub fn run(options: &RunOptions) -> Result<GameBoy> {
    let mut gb = load_session(options)?;

    for frame in 0..options.frames {
        gb.step_frame()
            .with_context(|| format!("emulation stopped during frame {frame}"))?;
        if gb.is_stopped() {
            log::info!("program executed STOP after {} frames", frame + 1);
            break;
        }
    }

    save_frame(&options.out, gb.canvas())?;
    log::info!(
        "wrote frame {} ({:?}) to {}",
        gb.frames(),
        options.render_mode,
        options.out.display()
    );

    if let Some(trace) = gb.cpu.disassembly() {
        for (addr, line) in trace {
            println!("{addr:04X}  {line}");
        }
    }
    Ok(gb)
}
