//! Per-format conversions between packed values and [`Color8888`].

use super::channels::{expand, reduce};
use super::RGB5A3_ALPHA_THRESHOLD;
use crate::color_8888::Color8888;

pub(crate) fn decode_i4(value: u32) -> Color8888 {
    Color8888::gray(expand(value, 4))
}

pub(crate) fn encode_i4(color: Color8888) -> u32 {
    reduce(color.luma(), 4)
}

pub(crate) fn decode_i8(value: u32) -> Color8888 {
    Color8888::gray(value as u8)
}

pub(crate) fn encode_i8(color: Color8888) -> u32 {
    color.luma() as u32
}

pub(crate) fn decode_ia4(value: u32) -> Color8888 {
    let i = expand(value, 4);
    Color8888::new(i, i, i, expand(value >> 4, 4))
}

pub(crate) fn encode_ia4(color: Color8888) -> u32 {
    (reduce(color.a, 4) << 4) | reduce(color.luma(), 4)
}

pub(crate) fn decode_ia8(value: u32) -> Color8888 {
    let i = value as u8;
    Color8888::new(i, i, i, (value >> 8) as u8)
}

pub(crate) fn encode_ia8(color: Color8888) -> u32 {
    ((color.a as u32) << 8) | color.luma() as u32
}

pub(crate) fn decode_rgb565(value: u32) -> Color8888 {
    Color8888::new(
        expand(value >> 11, 5),
        expand(value >> 5, 6),
        expand(value, 5),
        255,
    )
}

pub(crate) fn encode_rgb565(color: Color8888) -> u32 {
    (reduce(color.r, 5) << 11) | (reduce(color.g, 6) << 5) | reduce(color.b, 5)
}

pub(crate) fn decode_bgr565(value: u32) -> Color8888 {
    Color8888::new(
        expand(value, 5),
        expand(value >> 5, 6),
        expand(value >> 11, 5),
        255,
    )
}

pub(crate) fn encode_bgr565(color: Color8888) -> u32 {
    (reduce(color.b, 5) << 11) | (reduce(color.g, 6) << 5) | reduce(color.r, 5)
}

pub(crate) fn decode_argb1555(value: u32) -> Color8888 {
    Color8888::new(
        expand(value >> 10, 5),
        expand(value >> 5, 5),
        expand(value, 5),
        expand(value >> 15, 1),
    )
}

pub(crate) fn encode_argb1555(color: Color8888) -> u32 {
    (reduce(color.a, 1) << 15)
        | (reduce(color.r, 5) << 10)
        | (reduce(color.g, 5) << 5)
        | reduce(color.b, 5)
}

pub(crate) fn decode_abgr1555(value: u32) -> Color8888 {
    Color8888::new(
        expand(value, 5),
        expand(value >> 5, 5),
        expand(value >> 10, 5),
        expand(value >> 15, 1),
    )
}

pub(crate) fn encode_abgr1555(color: Color8888) -> u32 {
    (reduce(color.a, 1) << 15)
        | (reduce(color.b, 5) << 10)
        | (reduce(color.g, 5) << 5)
        | reduce(color.r, 5)
}

pub(crate) fn decode_rgb555(value: u32) -> Color8888 {
    Color8888::new(
        expand(value >> 10, 5),
        expand(value >> 5, 5),
        expand(value, 5),
        255,
    )
}

pub(crate) fn encode_rgb555(color: Color8888) -> u32 {
    0x8000 | (reduce(color.r, 5) << 10) | (reduce(color.g, 5) << 5) | reduce(color.b, 5)
}

pub(crate) fn decode_argb4444(value: u32) -> Color8888 {
    Color8888::new(
        expand(value >> 8, 4),
        expand(value >> 4, 4),
        expand(value, 4),
        expand(value >> 12, 4),
    )
}

pub(crate) fn encode_argb4444(color: Color8888) -> u32 {
    (reduce(color.a, 4) << 12)
        | (reduce(color.r, 4) << 8)
        | (reduce(color.g, 4) << 4)
        | reduce(color.b, 4)
}

pub(crate) fn decode_abgr4444(value: u32) -> Color8888 {
    Color8888::new(
        expand(value, 4),
        expand(value >> 4, 4),
        expand(value >> 8, 4),
        expand(value >> 12, 4),
    )
}

pub(crate) fn encode_abgr4444(color: Color8888) -> u32 {
    (reduce(color.a, 4) << 12)
        | (reduce(color.b, 4) << 8)
        | (reduce(color.g, 4) << 4)
        | reduce(color.r, 4)
}

pub(crate) fn decode_rgb5a3(value: u32) -> Color8888 {
    if value & 0x8000 != 0 {
        decode_rgb555(value)
    } else {
        Color8888::new(
            expand(value >> 8, 4),
            expand(value >> 4, 4),
            expand(value, 4),
            expand(value >> 12, 3),
        )
    }
}

pub(crate) fn encode_rgb5a3(color: Color8888) -> u32 {
    if color.a <= RGB5A3_ALPHA_THRESHOLD {
        (reduce(color.a, 3) << 12)
            | (reduce(color.r, 4) << 8)
            | (reduce(color.g, 4) << 4)
            | reduce(color.b, 4)
    } else {
        encode_rgb555(color)
    }
}

pub(crate) fn decode_argb8888(value: u32) -> Color8888 {
    Color8888::new((value >> 16) as u8, (value >> 8) as u8, value as u8, (value >> 24) as u8)
}

pub(crate) fn encode_argb8888(color: Color8888) -> u32 {
    ((color.a as u32) << 24) | ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

pub(crate) fn decode_abgr8888(value: u32) -> Color8888 {
    Color8888::new(value as u8, (value >> 8) as u8, (value >> 16) as u8, (value >> 24) as u8)
}

pub(crate) fn encode_abgr8888(color: Color8888) -> u32 {
    ((color.a as u32) << 24) | ((color.b as u32) << 16) | ((color.g as u32) << 8) | color.r as u32
}
