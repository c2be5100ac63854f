use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dotmatrix_common::Color;

use super::video::{LCDC, LY, LYC, STAT};
use super::*;
use crate::cpu::{Bus, Cpu, IE_ADDR, IF_ADDR};
use crate::{Error, SCREEN_HEIGHT, SCREEN_WIDTH};

/// ROM image with every bank filled with `0x10 + bank` and a valid header.
fn rom_image(size_code: u8, cartridge_type: u8, ram_code: u8) -> Vec<u8> {
    let banks = rom_bank_count(size_code).unwrap();
    let mut rom = vec![0u8; banks * ROM_BANK_SIZE];
    for (bank, chunk) in rom.chunks_mut(ROM_BANK_SIZE).enumerate() {
        chunk.fill(0x10u8.wrapping_add(bank as u8));
    }
    rom[0x134..0x134 + 11].copy_from_slice(b"DOTMATRIX\0\0");
    rom[0x147] = cartridge_type;
    rom[0x148] = size_code;
    rom[0x149] = ram_code;
    rom
}

fn mmu_with(rom: Vec<u8>) -> Mmu {
    let mut mmu = Mmu::new();
    mmu.load_cartridge(Cartridge::from_bytes(rom).unwrap());
    mmu
}

/// 32 KiB ROM without a controller, `program` placed at `0x0100`.
fn program_rom(program: &[u8]) -> Cartridge {
    let mut rom = vec![0u8; 2 * ROM_BANK_SIZE];
    rom[0x100..0x100 + program.len()].copy_from_slice(program);
    rom[0x134..0x138].copy_from_slice(b"TEST");
    Cartridge::from_bytes(rom).unwrap()
}

fn session(program: &[u8]) -> GameBoy {
    let mut gb = GameBoy::new(GameBoyConfig::builder().build()).unwrap();
    gb.load_cartridge(program_rom(program));
    gb
}

#[test]
fn header_fields_are_parsed() {
    let cart = Cartridge::from_bytes(rom_image(0x01, 0x03, 0x03)).unwrap();
    let header = cart.header();

    assert_eq!(header.title, "DOTMATRIX");
    assert_eq!(header.kind, CartridgeKind::Simple);
    assert_eq!(header.rom_banks, 4);
    assert_eq!(header.ram_banks, 4);
    assert_eq!(cart.read(0x4000), 0x11);
    assert_eq!(cart.read(cart.bytes().len()), 0xFF);
}

#[test]
fn size_code_tables() {
    assert_eq!(rom_bank_count(0x00), Ok(2));
    assert_eq!(rom_bank_count(0x01), Ok(4));
    assert_eq!(rom_bank_count(0x05), Ok(64));
    assert_eq!(rom_bank_count(0x06), Ok(128));
    assert_eq!(rom_bank_count(0x52), Ok(72));
    assert_eq!(rom_bank_count(0x53), Ok(80));
    assert_eq!(rom_bank_count(0x54), Ok(96));
    assert_eq!(rom_bank_count(0x07), Err(Error::UnknownRomSize(0x07)));

    let ram: Vec<usize> = (0..=5).map(ram_bank_count).collect();
    assert_eq!(ram, [0, 1, 1, 4, 16, 8]);
}

#[test]
fn bad_images_are_rejected() {
    assert_eq!(
        Cartridge::from_bytes(vec![0; 0x100]).unwrap_err(),
        Error::CartridgeTooSmall { len: 0x100 }
    );

    let mut rom = rom_image(0x00, 0x00, 0x00);
    rom[0x148] = 0x02;
    assert_eq!(
        Cartridge::from_bytes(rom).unwrap_err(),
        Error::CartridgeTruncated {
            declared: 8 * ROM_BANK_SIZE,
            actual: 2 * ROM_BANK_SIZE
        }
    );
}

#[test]
fn unsupported_controller_falls_back_to_none() {
    let cart = Cartridge::from_bytes(rom_image(0x00, 0x13, 0x00)).unwrap();
    assert_eq!(cart.kind(), CartridgeKind::None);
    assert_eq!(cart.header().cartridge_type, 0x13);
}

#[test]
fn rom_bank_select_wraps_to_bank_count() {
    let mut mmu = mmu_with(rom_image(0x01, 0x01, 0x00));

    assert_eq!(mmu.read8(0x0000), 0x10);
    assert_eq!(mmu.read8(0x4000), 0x11);

    mmu.write8(0x2000, 0x03);
    assert_eq!(mmu.rom_bank(), 3);
    assert_eq!(mmu.read8(0x7FFF), 0x13);
    assert_eq!(mmu.read8(0x0000), 0x10);

    // 5 mod 4
    mmu.write8(0x2000, 0x05);
    assert_eq!(mmu.rom_bank(), 1);
    assert_eq!(mmu.read8(0x4000), 0x11);

    // The register maps 0 to 1.
    mmu.write8(0x2000, 0x00);
    assert_eq!(mmu.rom_bank(), 1);
}

#[test]
fn wide_bank_select_is_value_mod_bank_count() {
    let mut mmu = mmu_with(rom_image(0x05, 0x01, 0x00));

    for value in 1..=0xFFu8 {
        mmu.write8(0x2000, value);
        let expected = value as usize % 64;
        assert_eq!(mmu.rom_bank(), expected, "select 0x{value:02X}");
        assert_eq!(mmu.read8(0x4000), 0x10u8.wrapping_add(expected as u8));
    }

    mmu.write8(0x2000, 0x00);
    assert_eq!(mmu.rom_bank(), 1);
}

#[test]
fn direct_bank_assignment_wraps() {
    let mut mmu = mmu_with(rom_image(0x01, 0x01, 0x03));

    mmu.set_rom_bank(0);
    assert_eq!(mmu.read8(0x4000), mmu.read8(0x0000));
    mmu.set_rom_bank(6);
    assert_eq!(mmu.rom_bank(), 2);
    mmu.set_ram_bank(5);
    assert_eq!(mmu.ram_bank(), 1);
}

#[test]
fn non_power_of_two_bank_counts_wrap() {
    let mut mmu = mmu_with(rom_image(0x52, 0x01, 0x00));

    // 0x1F | 2 << 5 = 95, masked to 7 bits and wrapped modulo 72.
    mmu.write8(0x2000, 0x1F);
    mmu.write8(0x4000, 0x02);
    assert_eq!(mmu.rom_bank(), 95 % 72);
    assert_eq!(mmu.read8(0x4000), 0x10u8.wrapping_add((95 % 72) as u8));
}

#[test]
fn upper_bits_follow_banking_mode() {
    let mut mmu = mmu_with(rom_image(0x05, 0x03, 0x03));

    mmu.write8(0x2000, 0x01);
    mmu.write8(0x4000, 0x01);
    assert_eq!(mmu.banking_mode(), BankingMode::Rom);
    assert_eq!(mmu.rom_bank(), 0x21);
    assert_eq!(mmu.ram_bank(), 0);

    mmu.write8(0x6000, 0x01);
    assert_eq!(mmu.banking_mode(), BankingMode::Ram);
    assert_eq!(mmu.rom_bank(), 0x01);
    assert_eq!(mmu.ram_bank(), 1);
}

#[test]
fn external_ram_enable_and_banking() {
    let mut mmu = mmu_with(rom_image(0x00, 0x03, 0x03));

    assert_eq!(mmu.read8(0xA000), 0xFF);
    mmu.write8(0xA000, 0x42);
    assert_eq!(mmu.read8(0xA000), 0xFF);

    mmu.write8(0x0000, 0x0A);
    assert!(mmu.ram_enabled());
    mmu.write8(0xA000, 0x42);
    assert_eq!(mmu.read8(0xA000), 0x42);

    mmu.write8(0x6000, 0x01);
    mmu.write8(0x4000, 0x02);
    assert_eq!(mmu.read8(0xA000), 0x00);
    mmu.write8(0xBFFF, 0x24);

    mmu.write8(0x4000, 0x00);
    assert_eq!(mmu.read8(0xA000), 0x42);
    assert_eq!(mmu.read8(0xBFFF), 0x00);

    mmu.write8(0x0000, 0x00);
    assert_eq!(mmu.read8(0xA000), 0xFF);
}

#[test]
fn rom_without_controller_ignores_writes() {
    let mut mmu = mmu_with(rom_image(0x00, 0x00, 0x00));

    mmu.write8(0x2000, 0x01);
    mmu.write8(0x0100, 0x99);
    assert_eq!(mmu.read8(0x0100), 0x10);
    assert_eq!(mmu.read8(0x2000), 0x10);
    assert_eq!(mmu.read8(0x4000), 0x11);

    // Without a cartridge RAM the A000 window is plain memory.
    mmu.write8(0xA123, 0x77);
    assert_eq!(mmu.read8(0xA123), 0x77);
}

#[test]
fn echo_ram_mirrors_work_ram() {
    let mut mmu = Mmu::new();

    mmu.write8(0xC123, 0xAB);
    assert_eq!(mmu.read8(0xE123), 0xAB);
    mmu.write8(0xFDFF, 0xCD);
    assert_eq!(mmu.read8(0xDDFF), 0xCD);

    mmu.raw_write8(0xE000, 0x11);
    assert_eq!(mmu.raw_read8(0xC000), 0x11);
    assert_eq!(mmu.raw().read8(0xE000), 0x11);

    // FE00 onwards is not part of the mirror.
    mmu.write8(0xFE00, 0x55);
    assert_eq!(mmu.read8(0xDE00), 0x00);
}

#[test]
fn every_address_decodes() {
    let mut mmu = mmu_with(rom_image(0x01, 0x03, 0x02));
    for addr in 0..=0xFFFFu16 {
        mmu.read8(addr);
    }
    mmu.write16(0xFFFF, 0x1234);
    assert_eq!(mmu.read8(0xFFFF), 0x34);
    assert_eq!(mmu.read8(0x0000), 0x10);
}

#[test]
fn word_access_is_little_endian() {
    let mut mmu = Mmu::new();
    mmu.write16(0xC000, 0xBEEF);
    assert_eq!(mmu.raw_read8(0xC000), 0xEF);
    assert_eq!(mmu.read16(0xC000), 0xBEEF);

    mmu.raw_write16(0xC010, 0x1234);
    assert_eq!(mmu.raw_read16(0xC010), 0x1234);
}

#[test]
fn hooks_fire_after_access_in_registration_order() {
    let mut mmu = Mmu::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let first = Rc::clone(&log);
    mmu.add_write_hook(0xC000, move |raw, addr, value| {
        first
            .borrow_mut()
            .push(format!("w1 {addr:04X}={value:02X} stored={:02X}", raw.read8(addr)));
    });
    let second = Rc::clone(&log);
    mmu.add_write_hook(0xC000, move |_, _, value| {
        second.borrow_mut().push(format!("w2 {value:02X}"));
    });
    let reads = Rc::clone(&log);
    mmu.add_read_hook(0xC000, move |addr, value| {
        reads.borrow_mut().push(format!("r {addr:04X}={value:02X}"));
    });

    mmu.write8(0xC000, 0x5A);
    assert_eq!(mmu.read8(0xC000), 0x5A);
    mmu.write8(0xC001, 0x01);
    mmu.raw_write8(0xC000, 0x00);

    assert_eq!(
        *log.borrow(),
        ["w1 C000=5A stored=5A", "w2 5A", "r C000=5A"]
    );
}

#[test]
fn write_hooks_can_rewrite_memory_but_not_suppress() {
    let mut mmu = Mmu::new();
    mmu.add_write_hook(0xFF50, |raw, _, value| {
        raw.write8(0xC000, value.wrapping_add(1));
    });

    mmu.write8(0xFF50, 0x41);
    assert_eq!(mmu.read8(0xFF50), 0x41);
    assert_eq!(mmu.read8(0xC000), 0x42);
}

#[test]
fn boot_rom_overlays_low_page_until_unmapped() {
    let mut mmu = mmu_with(rom_image(0x00, 0x00, 0x00));
    assert_eq!(
        mmu.load_boot_rom(&[0; 10]),
        Err(Error::InvalidBootRom { len: 10 })
    );

    mmu.load_boot_rom(&[0xAA; BOOT_ROM_SIZE]).unwrap();
    assert_eq!(mmu.read8(0x0000), 0xAA);
    assert_eq!(mmu.read8(0x00FF), 0xAA);
    assert_eq!(mmu.read8(0x0100), 0x10);

    mmu.unmap_boot_rom();
    assert!(!mmu.boot_rom_mapped());
    assert_eq!(mmu.read8(0x0000), 0x10);
}

fn video_setup() -> (Cpu, Mmu, Video) {
    let mut mmu = Mmu::new();
    let cpu = Cpu::new();
    let video = Video::new(&mut mmu);
    mmu.raw_write8(LCDC, 0x91);
    mmu.raw_write8(0xFF47, 0xE4);
    (cpu, mmu, video)
}

#[test]
fn mode_sequence_carries_excess_cycles() {
    let (mut cpu, mut mmu, mut video) = video_setup();

    video.update(79, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(video.mode(), LcdMode::OamScan);
    video.update(1, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(video.mode(), LcdMode::Transfer);
    assert_eq!(mmu.raw_read8(STAT) & 0x03, 3);

    video.update(172 + 204 + 10, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(video.line(), 1);
    assert_eq!(video.mode(), LcdMode::OamScan);
    assert_eq!(mmu.raw_read8(LY), 1);

    video.update(70, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(video.mode(), LcdMode::Transfer);
}

#[test]
fn frame_has_154_lines_and_one_vblank() {
    let (mut cpu, mut mmu, mut video) = video_setup();
    let hook_calls = Rc::new(Cell::new(0));
    let calls = Rc::clone(&hook_calls);
    video.add_frame_hook(move |canvas| {
        assert_eq!(canvas.len(), SCREEN_WIDTH * SCREEN_HEIGHT);
        calls.set(calls.get() + 1);
    });

    let mut increments = 0;
    let mut vblanks = 0;
    let mut last = video.line();
    for _ in 0..FRAME_CYCLES / 4 {
        video.update(4, &mut cpu, &mut mmu, RenderMode::Normal);
        if video.line() != last {
            increments += 1;
            last = video.line();
        }
        if mmu.raw_read8(IF_ADDR) & 0x01 != 0 {
            assert_eq!(video.line(), 144);
            vblanks += 1;
            mmu.raw_write8(IF_ADDR, 0);
        }
    }

    assert_eq!(increments, 154);
    assert_eq!(vblanks, 1);
    assert_eq!(video.line(), 0);
    assert_eq!(video.mode(), LcdMode::OamScan);
    assert_eq!(video.frames(), 1);
    assert_eq!(hook_calls.get(), 1);
}

#[test]
fn ly_write_resets_line_and_reads_zero() {
    let (mut cpu, mut mmu, mut video) = video_setup();
    video.update(456 * 10 + 100, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(video.line(), 10);

    for value in [0x00, 0x42, 0xFF] {
        mmu.write8(LY, value);
        assert_eq!(mmu.read8(LY), 0);
        assert_eq!(video.line(), 0);
    }
}

#[test]
fn lcd_off_resets_and_freezes_timing() {
    let (mut cpu, mut mmu, mut video) = video_setup();
    video.update(456 * 5 + 90, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(video.line(), 5);

    mmu.raw_write8(LCDC, 0x11);
    video.update(4, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(video.line(), 0);
    assert_eq!(video.mode(), LcdMode::OamScan);
    assert_eq!(mmu.raw_read8(LY), 0);

    video.update(100_000, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(video.line(), 0);
    assert_eq!(video.frames(), 0);

    mmu.raw_write8(LCDC, 0x91);
    video.update(80, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(video.mode(), LcdMode::Transfer);
    assert_eq!(video.line(), 0);
}

#[test]
fn lyc_match_raises_stat_interrupt_once() {
    let (mut cpu, mut mmu, mut video) = video_setup();
    mmu.raw_write8(LYC, 2);
    mmu.raw_write8(STAT, 0x40);

    video.update(456 * 2 - 4, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(mmu.raw_read8(IF_ADDR) & 0x02, 0);

    video.update(4, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(video.line(), 2);
    assert_ne!(mmu.raw_read8(STAT) & 0x04, 0);
    assert_ne!(mmu.raw_read8(IF_ADDR) & 0x02, 0);

    mmu.raw_write8(IF_ADDR, 0);
    video.update(200, &mut cpu, &mut mmu, RenderMode::Normal);
    assert_eq!(mmu.raw_read8(IF_ADDR) & 0x02, 0, "no retrigger while high");
}

#[test]
fn background_line_uses_unsigned_tile_data() {
    let (mut cpu, mut mmu, mut video) = video_setup();
    // Tile 1, row 0: colour 1 everywhere.
    mmu.raw_write8(0x8010, 0xFF);
    mmu.raw_write8(0x8011, 0x00);
    mmu.raw_write8(0x9800, 0x01);

    video.update(80 + 172, &mut cpu, &mut mmu, RenderMode::Normal);

    let canvas = video.canvas();
    assert!(canvas[..8].iter().all(|&c| c == Color::gray(170)));
    assert_eq!(canvas[8], Color::gray(255));
}

#[test]
fn background_line_honours_signed_tiles_scroll_and_map_select() {
    let (mut cpu, mut mmu, mut video) = video_setup();
    // LCD on, signed tile data, map at 0x9C00.
    mmu.raw_write8(LCDC, 0x89);
    mmu.raw_write8(0xFF47, 0xE4);
    // Tile 0 of the signed block lives at 0x9000; its row 3 is colour 2.
    mmu.raw_write8(0x9000 + 3 * 2, 0x00);
    mmu.raw_write8(0x9000 + 3 * 2 + 1, 0xFF);
    // Tile -128 (index 0x80) is at 0x8800, row 3 colour 3.
    mmu.raw_write8(0x8800 + 3 * 2, 0xFF);
    mmu.raw_write8(0x8800 + 3 * 2 + 1, 0xFF);
    mmu.raw_write8(0x9C00, 0x00);
    mmu.raw_write8(0x9C01, 0x80);
    mmu.raw_write8(0xFF42, 3);
    mmu.raw_write8(0xFF43, 4);

    video.update(80 + 172, &mut cpu, &mut mmu, RenderMode::Normal);

    let canvas = video.canvas();
    assert_eq!(canvas[0], Color::gray(85));
    assert_eq!(canvas[3], Color::gray(85));
    assert_eq!(canvas[4], Color::gray(0));
}

#[test]
fn tile_sheet_reads_signed_block_through_palette() {
    let (mut cpu, mut mmu, mut video) = video_setup();
    // Tile 0 of the signed block, row 0: colour 3.
    mmu.raw_write8(0x9000, 0xFF);
    mmu.raw_write8(0x9001, 0xFF);
    // 0x8800 must not show up in the high sheet.
    mmu.raw_write8(0x8800, 0xFF);
    mmu.raw_write8(0x8801, 0x00);

    video.update(252, &mut cpu, &mut mmu, RenderMode::TileSheet { high_block: true });
    assert!(video.canvas()[..8].iter().all(|&c| c == Color::gray(0)));
    assert_eq!(video.canvas()[8], Color::gray(255));

    // Inverted palette: colour 0 becomes black.
    mmu.raw_write8(0xFF47, 0x1B);
    video.update(204 + 252, &mut cpu, &mut mmu, RenderMode::TileSheet { high_block: false });
    assert_eq!(video.line(), 1);
    assert_eq!(video.canvas()[SCREEN_WIDTH], Color::gray(0));
}

#[test]
fn tile_map_follows_scroll_in_whole_tiles() {
    let (mut cpu, mut mmu, mut video) = video_setup();
    mmu.raw_write8(0xFF42, 8);
    // 250 / 8 = column 31; the fine offset is ignored.
    mmu.raw_write8(0xFF43, 250);
    mmu.raw_write8(0x9C20 + 31, 0x40);
    mmu.raw_write8(0x9C20, 0x80);

    video.update(252, &mut cpu, &mut mmu, RenderMode::TileMap { high_map: true });

    let canvas = video.canvas();
    assert_eq!(canvas[0], Color::gray(0x40));
    assert_eq!(canvas[7], Color::gray(0x40));
    assert_eq!(canvas[8], Color::gray(0x80));
    assert_eq!(canvas[16], Color::gray(0));
}

#[test]
fn session_completes_frames() {
    // JR -2
    let mut gb = session(&[0x18, 0xFE]);
    let frames = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&frames);
    gb.add_frame_hook(move |_| seen.set(seen.get() + 1));

    gb.step_frame().unwrap();
    gb.step_frame().unwrap();

    assert_eq!(gb.frames(), 2);
    assert_eq!(frames.get(), 2);
    assert_eq!(gb.canvas().len(), SCREEN_WIDTH * SCREEN_HEIGHT);
    assert_eq!(gb.cpu.regs.pc, 0x0100);
    // Post-boot IF is 0xE1; V-blank requests leave the unused bits set.
    assert_eq!(gb.mmu.read8(IF_ADDR), 0xE1);
}

#[test]
fn vblank_wakes_halt_without_ime() {
    // LD A,0 ; LDH (0F),A ; INC A ; LDH (FF),A ; HALT ; NOP
    let mut gb = session(&[0x3E, 0x00, 0xE0, 0x0F, 0x3C, 0xE0, 0xFF, 0x76, 0x00]);

    for _ in 0..5 {
        gb.step().unwrap();
    }
    assert!(gb.cpu.halted);

    let mut steps = 0;
    while gb.cpu.halted {
        assert_eq!(gb.step().unwrap(), 4);
        steps += 1;
        assert!(steps < 20_000, "never woke");
    }
    assert_eq!(gb.frames(), 1);
    assert_eq!(gb.cpu.regs.pc, 0x0108);
    assert_eq!(gb.mmu.read8(IF_ADDR) & 0x01, 0x01);
}

#[test]
fn vblank_is_dispatched_with_ime() {
    // XOR A ; LDH (0F),A ; INC A ; LDH (FF),A ; EI ; HALT
    let mut gb = session(&[0xAF, 0xE0, 0x0F, 0x3C, 0xE0, 0xFF, 0xFB, 0x76]);

    let mut reached_vector = false;
    for _ in 0..20_000 {
        gb.step().unwrap();
        if gb.cpu.regs.pc == Interrupt::VBlank.vector() {
            reached_vector = true;
            break;
        }
    }
    assert!(reached_vector);
    assert!(!gb.cpu.ime);
    assert_eq!(gb.mmu.read8(IF_ADDR) & 0x01, 0);
    assert_eq!(gb.mmu.read16(gb.cpu.regs.sp), 0x0108);
    assert_eq!(gb.mmu.read8(IE_ADDR), 0x01);
}

#[test]
fn step_frame_gives_up_with_lcd_off() {
    // XOR A ; LDH (40),A ; JR -2
    let mut gb = session(&[0xAF, 0xE0, 0x40, 0x18, 0xFE]);

    gb.step_frame().unwrap();
    assert_eq!(gb.frames(), 0);
    assert_eq!(gb.video.line(), 0);
}

#[test]
fn run_until_break_stops_after_one_step() {
    let mut gb = session(&[0x00, 0x00, 0x00]);

    assert!(!gb.run_until_break(2).unwrap());
    assert_eq!(gb.cpu.regs.pc, 0x0102);

    gb.request_break();
    assert!(gb.run_until_break(100).unwrap());
    assert_eq!(gb.cpu.regs.pc, 0x0103);
}

#[test]
fn illegal_instruction_stops_the_session() {
    let mut gb = session(&[0x00, 0xFD]);
    gb.step().unwrap();

    assert_eq!(
        gb.step_frame(),
        Err(Error::IllegalInstruction {
            opcode: 0xFD,
            pc: 0x0101
        })
    );
}

#[test]
fn boot_rom_runs_then_hands_over() {
    let config = GameBoyConfig::builder()
        .boot_rom(vec![0x00; BOOT_ROM_SIZE])
        .trace(true)
        .build();
    let mut gb = GameBoy::new(config).unwrap();
    let mut rom = vec![0u8; 2 * ROM_BANK_SIZE];
    rom[0x0000] = 0xAA;
    gb.load_cartridge(Cartridge::from_bytes(rom).unwrap());

    assert_eq!(gb.cpu.regs.pc, 0x0000);
    assert_eq!(gb.mmu.read8(0x0000), 0x00);

    for _ in 0..BOOT_ROM_SIZE {
        gb.step().unwrap();
    }
    assert_eq!(gb.cpu.regs.pc, 0x0100);
    assert!(!gb.mmu.boot_rom_mapped());
    assert_eq!(gb.mmu.read8(0x0000), 0xAA);
    assert_eq!(gb.cpu.disassembly().map(|trace| trace.len()), Some(BOOT_ROM_SIZE));
}

#[test]
fn invalid_boot_rom_is_rejected() {
    let config = GameBoyConfig::builder().boot_rom(vec![0; 512]).build();
    assert!(matches!(
        GameBoy::new(config),
        Err(Error::InvalidBootRom { len: 512 })
    ));
}
