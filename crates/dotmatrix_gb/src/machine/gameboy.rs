use dotmatrix_common::Color;
use typed_builder::TypedBuilder;

use super::cartridge::Cartridge;
use super::mmu::Mmu;
use super::video::{RenderMode, Video, FRAME_CYCLES, LCDC};
use crate::cpu::Cpu;
use crate::Result;

/// Video time that passes while the CPU sits in HALT: one machine cycle.
const HALT_IDLE_CYCLES: u32 = 4;

/// Session options.
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct GameBoyConfig {
    /// 256-byte boot ROM. Without one the session starts at `0x0100` in the
    /// post-boot state.
    #[builder(default, setter(strip_option))]
    pub boot_rom: Option<Vec<u8>>,
    /// Record a disassembly line per executed address.
    #[builder(default = false)]
    pub trace: bool,
    #[builder(default = RenderMode::Normal)]
    pub render_mode: RenderMode,
}

/// One emulation session: CPU, bus and video driven in lockstep.
pub struct GameBoy {
    pub cpu: Cpu,
    pub mmu: Mmu,
    pub video: Video,
    render_mode: RenderMode,
}

impl GameBoy {
    pub fn new(config: GameBoyConfig) -> Result<Self> {
        let mut mmu = Mmu::new();
        let mut cpu = match config.boot_rom.as_deref() {
            Some(boot_rom) => {
                mmu.load_boot_rom(boot_rom)?;
                Cpu::with_boot_rom()
            }
            None => {
                mmu.apply_post_boot_io();
                Cpu::new()
            }
        };
        cpu.set_trace(config.trace);
        let video = Video::new(&mut mmu);

        Ok(Self {
            cpu,
            mmu,
            video,
            render_mode: config.render_mode,
        })
    }

    pub fn load_cartridge(&mut self, cartridge: Cartridge) {
        self.mmu.load_cartridge(cartridge);
    }

    #[inline]
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Run one instruction, advance the video by the same amount of time and
    /// dispatch a pending interrupt. Returns the cycles that elapsed.
    ///
    /// While halted the CPU reports 0 cycles; the video still advances by one
    /// machine cycle so that V-blank can wake it.
    pub fn step(&mut self) -> Result<u32> {
        let mut cycles = self.cpu.step(&mut self.mmu)?;
        if cycles == 0 && self.cpu.halted {
            cycles = HALT_IDLE_CYCLES;
        }
        self.video
            .update(cycles, &mut self.cpu, &mut self.mmu, self.render_mode);

        let dispatch = self.cpu.execute_interrupts(&mut self.mmu);
        if dispatch > 0 {
            self.video
                .update(dispatch, &mut self.cpu, &mut self.mmu, self.render_mode);
        }

        Ok(cycles + dispatch)
    }

    /// Step until the video completes a frame. With the LCD off, give up
    /// after one frame's worth of cycles.
    pub fn step_frame(&mut self) -> Result<()> {
        let start = self.video.frames();
        let mut elapsed = 0u32;

        while self.video.frames() == start {
            elapsed += self.step()?;
            if elapsed >= FRAME_CYCLES && self.mmu.raw_read8(LCDC) & 0x80 == 0 {
                break;
            }
        }
        Ok(())
    }

    /// Step until the step that honoured `request_break`, or `max_steps`.
    ///
    /// Returns whether the break was hit.
    pub fn run_until_break(&mut self, max_steps: usize) -> Result<bool> {
        for _ in 0..max_steps {
            self.step()?;
            if self.cpu.take_break() {
                log::debug!("break after 0x{:04X}", self.cpu.prev_pc());
                return Ok(true);
            }
        }
        Ok(false)
    }

    #[inline]
    pub fn request_break(&mut self) {
        self.cpu.request_break();
    }

    #[inline]
    pub fn canvas(&self) -> &[Color] {
        self.video.canvas()
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.video.frames()
    }

    pub fn add_frame_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&[Color]) + 'static,
    {
        self.video.add_frame_hook(hook);
    }

    /// Whether the program has executed STOP.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.cpu.is_stopped()
    }
}
