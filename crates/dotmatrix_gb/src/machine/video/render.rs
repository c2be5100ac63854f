use dotmatrix_common::Color;

use super::{BGP, LCDC, SCX, SCY};
use crate::machine::mmu::Mmu;
use crate::SCREEN_WIDTH;

const TILE_BYTES: u16 = 16;
const SHEET_TILES_PER_ROW: usize = SCREEN_WIDTH / 8;

/// Grey level for a DMG shade (0 = white, 3 = black).
#[inline]
pub(super) fn shade_color(shade: u8) -> Color {
    Color::gray(255 - 85 * (shade & 0x03))
}

/// 2-bit colour index of pixel `x` (0 = leftmost) in a tile row.
#[inline]
fn tile_pixel(mmu: &Mmu, row_addr: u16, x: u8) -> u8 {
    let lo = mmu.raw_read8(row_addr);
    let hi = mmu.raw_read8(row_addr.wrapping_add(1));
    let bit = 7 - (x & 7);
    (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
}

/// Address of tile `index` under the LCDC bit 4 addressing mode.
#[inline]
fn tile_address(index: u8, unsigned: bool) -> u16 {
    if unsigned {
        0x8000 + index as u16 * TILE_BYTES
    } else {
        0x8800 + index.wrapping_add(128) as u16 * TILE_BYTES
    }
}

/// Render one background scanline into `row`.
pub(super) fn background_line(mmu: &Mmu, line: u8, row: &mut [Color]) {
    let lcdc = mmu.raw_read8(LCDC);
    if lcdc & 0x01 == 0 {
        row.fill(shade_color(0));
        return;
    }

    let map_base: u16 = if lcdc & 0x08 != 0 { 0x9C00 } else { 0x9800 };
    let unsigned = lcdc & 0x10 != 0;
    let scx = mmu.raw_read8(SCX);
    let bgp = mmu.raw_read8(BGP);

    let y = line.wrapping_add(mmu.raw_read8(SCY));
    let map_row = map_base + (y / 8) as u16 * 32;
    let fine_y = (y & 7) as u16;

    for (x, pixel) in row.iter_mut().enumerate() {
        let bg_x = (x as u8).wrapping_add(scx);
        let index = mmu.raw_read8(map_row + (bg_x / 8) as u16);
        let color = tile_pixel(mmu, tile_address(index, unsigned) + fine_y * 2, bg_x);
        *pixel = shade_color(bgp >> (color * 2));
    }
}

/// Render row `line` of the raw tile sheet, 20 tiles across, through BGP.
///
/// `high_block` starts the sheet at `0x9000`, tile 0 of the signed block.
pub(super) fn tile_sheet_line(mmu: &Mmu, line: u8, high_block: bool, row: &mut [Color]) {
    let base: u16 = if high_block { 0x9000 } else { 0x8000 };
    let bgp = mmu.raw_read8(BGP);
    let tile_row = line as usize / 8;
    let fine_y = (line & 7) as u16;

    for (x, pixel) in row.iter_mut().enumerate() {
        let tile = (tile_row * SHEET_TILES_PER_ROW + x / 8) as u16;
        let row_addr = base + tile * TILE_BYTES + fine_y * 2;
        *pixel = if row_addr < 0x9800 {
            shade_color(bgp >> (tile_pixel(mmu, row_addr, x as u8) * 2))
        } else {
            shade_color(0)
        };
    }
}

/// Render row `line` of the tile map, one grey cell per tile index.
///
/// The map scrolls with SCY and with SCX in whole tiles, wrapping at 32.
pub(super) fn tile_map_line(mmu: &Mmu, line: u8, high_map: bool, row: &mut [Color]) {
    let base: u16 = if high_map { 0x9C00 } else { 0x9800 };
    let y = line.wrapping_add(mmu.raw_read8(SCY));
    let map_row = base + (y / 8) as u16 * 32;
    let first_column = (mmu.raw_read8(SCX) / 8) as usize;

    for (x, pixel) in row.iter_mut().enumerate() {
        let column = ((first_column + x / 8) & 31) as u16;
        *pixel = Color::gray(mmu.raw_read8(map_row + column));
    }
}
