mod render;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use dotmatrix_common::Color;

use super::mmu::Mmu;
use crate::cpu::{Cpu, Interrupt};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub(crate) const LCDC: u16 = 0xFF40;
pub(crate) const STAT: u16 = 0xFF41;
pub(crate) const SCY: u16 = 0xFF42;
pub(crate) const SCX: u16 = 0xFF43;
pub(crate) const LY: u16 = 0xFF44;
pub(crate) const LYC: u16 = 0xFF45;
pub(crate) const BGP: u16 = 0xFF47;

const OAM_SCAN_CYCLES: u32 = 80;
const TRANSFER_CYCLES: u32 = 172;
const HBLANK_CYCLES: u32 = 204;
const LINE_CYCLES: u32 = 456;
const FIRST_VBLANK_LINE: u8 = 144;
const LAST_LINE: u8 = 153;

/// Cycles in one full frame (154 lines of 456 cycles).
pub const FRAME_CYCLES: u32 = LINE_CYCLES * (LAST_LINE as u32 + 1);

/// Callback receiving the finished 160x144 canvas, row-major.
pub type FrameHook = Box<dyn FnMut(&[Color])>;

/// PPU mode, numbered as reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LcdMode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

/// Which picture `update` draws into the canvas. Timing is identical for all
/// of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// The background layer, as the LCD shows it.
    #[default]
    Normal,
    /// Tile data, 20 tiles per row through BGP, from `0x8000` (or `0x9000`
    /// with `high_block`).
    TileSheet { high_block: bool },
    /// The tile map at `0x9800` (or `0x9C00` with `high_map`), scrolled by
    /// SCY and by SCX in whole tiles, each cell painted with its tile index
    /// as a grey level.
    TileMap { high_map: bool },
}

/// Scanline timing state machine and frame buffer.
pub struct Video {
    /// Shared with the LY write hook, which resets it.
    line: Rc<Cell<u8>>,
    mode: LcdMode,
    counter: u32,
    lcd_on: bool,
    stat_line: bool,
    canvas: Vec<Color>,
    frame_hooks: Vec<FrameHook>,
    frames: u64,
}

impl Video {
    /// Create the engine and install its LY write hook on `mmu`.
    pub fn new(mmu: &mut Mmu) -> Self {
        let line = Rc::new(Cell::new(0u8));

        let hook_line = Rc::clone(&line);
        mmu.add_write_hook(LY, move |raw, addr, _value| {
            hook_line.set(0);
            raw.write8(addr, 0);
        });

        Self {
            line,
            mode: LcdMode::OamScan,
            counter: 0,
            lcd_on: false,
            stat_line: false,
            canvas: vec![Color::WHITE; SCREEN_WIDTH * SCREEN_HEIGHT],
            frame_hooks: Vec::new(),
            frames: 0,
        }
    }

    #[inline]
    pub fn line(&self) -> u8 {
        self.line.get()
    }

    #[inline]
    pub fn mode(&self) -> LcdMode {
        self.mode
    }

    /// Completed frames since creation.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn canvas(&self) -> &[Color] {
        &self.canvas
    }

    pub fn add_frame_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&[Color]) + 'static,
    {
        self.frame_hooks.push(Box::new(hook));
    }

    /// Advance the state machine by `cycles` CPU cycles.
    ///
    /// Cycles left over after a mode change count towards the next mode.
    /// Nothing advances while LCDC bit 7 is clear.
    pub fn update(&mut self, cycles: u32, cpu: &mut Cpu, mmu: &mut Mmu, render_mode: RenderMode) {
        if mmu.raw_read8(LCDC) & 0x80 == 0 {
            if self.lcd_on {
                self.switch_off(mmu);
            }
            return;
        }
        self.lcd_on = true;
        self.counter += cycles;

        loop {
            let line = self.line.get();
            match self.mode {
                LcdMode::OamScan if self.counter >= OAM_SCAN_CYCLES => {
                    self.counter -= OAM_SCAN_CYCLES;
                    self.mode = LcdMode::Transfer;
                }
                LcdMode::Transfer if self.counter >= TRANSFER_CYCLES => {
                    self.counter -= TRANSFER_CYCLES;
                    self.render_line(mmu, line, render_mode);
                    self.mode = LcdMode::HBlank;
                }
                LcdMode::HBlank if self.counter >= HBLANK_CYCLES => {
                    self.counter -= HBLANK_CYCLES;
                    let next = line + 1;
                    self.line.set(next);
                    if next == FIRST_VBLANK_LINE {
                        self.mode = LcdMode::VBlank;
                        self.finish_frame(cpu, mmu);
                    } else {
                        self.mode = LcdMode::OamScan;
                    }
                }
                LcdMode::VBlank if self.counter >= LINE_CYCLES => {
                    self.counter -= LINE_CYCLES;
                    if line >= LAST_LINE {
                        self.line.set(0);
                        self.mode = LcdMode::OamScan;
                    } else {
                        self.line.set(line + 1);
                    }
                }
                _ => break,
            }
            self.sync_registers(cpu, mmu);
        }

        self.sync_registers(cpu, mmu);
    }

    fn switch_off(&mut self, mmu: &mut Mmu) {
        log::debug!("LCD off at line {} ({:?})", self.line.get(), self.mode);
        self.lcd_on = false;
        self.line.set(0);
        self.mode = LcdMode::OamScan;
        self.counter = 0;
        self.stat_line = false;
        mmu.raw_write8(LY, 0);
        let stat = mmu.raw_read8(STAT) & !0x07;
        mmu.raw_write8(STAT, stat);
    }

    fn finish_frame(&mut self, cpu: &mut Cpu, mmu: &mut Mmu) {
        for hook in self.frame_hooks.iter_mut() {
            hook(&self.canvas);
        }
        cpu.request_interrupt(mmu, Interrupt::VBlank);
        self.frames += 1;
        log::debug!("frame {} complete, V-blank requested", self.frames);
    }

    /// Publish LY and the STAT mode/coincidence bits, and raise the
    /// LCD-status interrupt on a rising edge of any enabled STAT source.
    fn sync_registers(&mut self, cpu: &mut Cpu, mmu: &mut Mmu) {
        let line = self.line.get();
        mmu.raw_write8(LY, line);

        let coincidence = line == mmu.raw_read8(LYC);
        let mut stat = mmu.raw_read8(STAT) & !0x07;
        stat |= self.mode as u8;
        if coincidence {
            stat |= 0x04;
        }
        mmu.raw_write8(STAT, stat);

        let source = (stat & 0x40 != 0 && coincidence)
            || (stat & 0x20 != 0 && self.mode == LcdMode::OamScan)
            || (stat & 0x10 != 0 && self.mode == LcdMode::VBlank)
            || (stat & 0x08 != 0 && self.mode == LcdMode::HBlank);

        if source && !self.stat_line {
            log::debug!("STAT interrupt: STAT=0x{stat:02X} LY={line} mode={:?}", self.mode);
            cpu.request_interrupt(mmu, Interrupt::LcdStat);
        }
        self.stat_line = source;
    }

    fn render_line(&mut self, mmu: &Mmu, line: u8, render_mode: RenderMode) {
        let y = line as usize;
        if y >= SCREEN_HEIGHT {
            return;
        }
        let row = &mut self.canvas[y * SCREEN_WIDTH..(y + 1) * SCREEN_WIDTH];
        match render_mode {
            RenderMode::Normal => render::background_line(mmu, line, row),
            RenderMode::TileSheet { high_block } => render::tile_sheet_line(mmu, line, high_block, row),
            RenderMode::TileMap { high_map } => render::tile_map_line(mmu, line, high_map, row),
        }
    }
}

impl fmt::Debug for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Video")
            .field("line", &self.line.get())
            .field("mode", &self.mode)
            .field("counter", &self.counter)
            .field("lcd_on", &self.lcd_on)
            .field("frames", &self.frames)
            .field("frame_hooks", &self.frame_hooks.len())
            .finish()
    }
}
