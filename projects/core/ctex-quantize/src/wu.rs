//! Wu's color quantizer, extended to an alpha axis.
//!
//! Colors are binned into a 33x33x33x9 histogram (5 bits per color channel, 3 bits of
//! alpha, plus a zero plane so cumulative moments can be differenced). The color cube is
//! then split box by box: each round picks the box with the largest variance and cuts it
//! along the axis and position that minimizes the summed variance of both halves. Boxes
//! spanning a single cell, or with no cut leaving pixels on both sides, are never split.

use alloc::vec;
use alloc::vec::Vec;
use ctex_common::Color8888;

const SIDE: usize = 33;
const ALPHA_SIDE: usize = 9;
const DIMS: [usize; 4] = [SIDE, SIDE, SIDE, ALPHA_SIDE];
const CELLS: usize = SIDE * SIDE * SIDE * ALPHA_SIDE;

#[inline]
fn cell_index(c: [usize; 4]) -> usize {
    ((c[0] * SIDE + c[1]) * SIDE + c[2]) * ALPHA_SIDE + c[3]
}

#[inline]
fn pixel_cell(pixel: Color8888) -> [usize; 4] {
    [
        (pixel.r >> 3) as usize + 1,
        (pixel.g >> 3) as usize + 1,
        (pixel.b >> 3) as usize + 1,
        (pixel.a >> 5) as usize + 1,
    ]
}

/// Box in histogram space: exclusive lower bound, inclusive upper bound per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cube {
    lower: [usize; 4],
    upper: [usize; 4],
}

impl Cube {
    fn whole() -> Self {
        Self {
            lower: [0; 4],
            upper: [SIDE - 1, SIDE - 1, SIDE - 1, ALPHA_SIDE - 1],
        }
    }

    fn cells(&self) -> usize {
        (0..4).map(|d| self.upper[d] - self.lower[d]).product()
    }
}

/// Pixel count and channel sums of a box.
#[derive(Debug, Clone, Copy, Default)]
struct Stats {
    weight: i64,
    sums: [i64; 4],
}

impl Stats {
    fn minus(self, other: Stats) -> Stats {
        Stats {
            weight: self.weight - other.weight,
            sums: core::array::from_fn(|i| self.sums[i] - other.sums[i]),
        }
    }

    /// Squared length of the channel sum vector over the weight.
    fn spread(&self) -> f64 {
        let norm: f64 = self.sums.iter().map(|&s| (s as f64) * (s as f64)).sum();
        norm / self.weight as f64
    }

    fn mean(&self) -> Color8888 {
        let channel = |sum: i64| ((sum + self.weight / 2) / self.weight).clamp(0, 255) as u8;
        Color8888::new(
            channel(self.sums[0]),
            channel(self.sums[1]),
            channel(self.sums[2]),
            channel(self.sums[3]),
        )
    }
}

/// Cumulative histogram moments.
struct Moments {
    weight: Vec<i64>,
    sums: [Vec<i64>; 4],
    squares: Vec<f64>,
}

impl Moments {
    fn build(pixels: &[Color8888]) -> Self {
        let mut moments = Self {
            weight: vec![0; CELLS],
            sums: core::array::from_fn(|_| vec![0; CELLS]),
            squares: vec![0.0; CELLS],
        };

        for &pixel in pixels {
            let index = cell_index(pixel_cell(pixel));
            let channels = pixel.to_array();
            moments.weight[index] += 1;
            for (sum, &channel) in moments.sums.iter_mut().zip(channels.iter()) {
                sum[index] += channel as i64;
            }
            moments.squares[index] += channels
                .iter()
                .map(|&c| (c as f64) * (c as f64))
                .sum::<f64>();
        }

        for axis in 0..4 {
            let stride: usize = DIMS[axis + 1..].iter().product();
            for index in 0..CELLS {
                if (index / stride) % DIMS[axis] == 0 {
                    continue;
                }
                moments.weight[index] += moments.weight[index - stride];
                for sum in moments.sums.iter_mut() {
                    sum[index] += sum[index - stride];
                }
                moments.squares[index] += moments.squares[index - stride];
            }
        }
        moments
    }

    /// Visits the 16 corners of `cube` with their inclusion-exclusion sign.
    #[inline]
    fn corners(cube: &Cube) -> impl Iterator<Item = (usize, i64)> + '_ {
        (0..16u32).map(move |corner| {
            let mut coords = [0usize; 4];
            let mut sign = 1i64;
            for (d, coord) in coords.iter_mut().enumerate() {
                if corner >> d & 1 == 1 {
                    *coord = cube.upper[d];
                } else {
                    *coord = cube.lower[d];
                    sign = -sign;
                }
            }
            (cell_index(coords), sign)
        })
    }

    fn stats(&self, cube: &Cube) -> Stats {
        let mut stats = Stats::default();
        for (index, sign) in Self::corners(cube) {
            stats.weight += sign * self.weight[index];
            for (total, sum) in stats.sums.iter_mut().zip(self.sums.iter()) {
                *total += sign * sum[index];
            }
        }
        stats
    }

    fn variance(&self, cube: &Cube) -> f64 {
        if cube.cells() <= 1 {
            return 0.0;
        }
        let stats = self.stats(cube);
        if stats.weight == 0 {
            return 0.0;
        }
        let squares: f64 = Self::corners(cube)
            .map(|(index, sign)| sign as f64 * self.squares[index])
            .sum();
        (squares - stats.spread()).max(0.0)
    }

    /// Best cut of `cube` along `axis`: the score to maximize and the cut position.
    fn maximize(&self, cube: &Cube, axis: usize, whole: Stats) -> Option<(f64, usize)> {
        let mut best: Option<(f64, usize)> = None;
        for cut in cube.lower[axis] + 1..cube.upper[axis] {
            let mut half = *cube;
            half.upper[axis] = cut;
            let first = self.stats(&half);
            if first.weight == 0 {
                continue;
            }
            let second = whole.minus(first);
            if second.weight == 0 {
                continue;
            }
            let score = first.spread() + second.spread();
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, cut));
            }
        }
        best
    }

    fn cut(&self, cube: &Cube) -> Option<(Cube, Cube)> {
        let whole = self.stats(cube);
        let (axis, position) = (0..4)
            .filter_map(|axis| {
                self.maximize(cube, axis, whole)
                    .map(|(score, position)| (axis, score, position))
            })
            .fold(None, |best: Option<(usize, f64, usize)>, candidate| match best {
                Some(best) if best.1 >= candidate.1 => Some(best),
                _ => Some(candidate),
            })
            .map(|(axis, _, position)| (axis, position))?;

        let mut first = *cube;
        let mut second = *cube;
        first.upper[axis] = position;
        second.lower[axis] = position;
        Some((first, second))
    }
}

/// Palette and per-pixel box tags.
pub(crate) struct Reduction {
    pub(crate) palette: Vec<Color8888>,
    pub(crate) indices: Vec<u8>,
}

/// Partitions the colors of `pixels` into at most `max_colors` boxes.
pub(crate) fn reduce(pixels: &[Color8888], max_colors: usize) -> Reduction {
    let moments = Moments::build(pixels);
    let mut cubes = vec![Cube::whole()];
    let mut variances = vec![moments.variance(&cubes[0])];

    while cubes.len() < max_colors {
        let Some((next, _)) = variances
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > 0.0)
            .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                Some(best) if best.1 >= v => Some(best),
                _ => Some((i, v)),
            })
        else {
            break;
        };

        match moments.cut(&cubes[next]) {
            Some((first, second)) => {
                variances[next] = moments.variance(&first);
                variances.push(moments.variance(&second));
                cubes[next] = first;
                cubes.push(second);
            }
            None => variances[next] = 0.0,
        }
    }

    let mut tags = vec![0u8; CELLS];
    for (tag, cube) in cubes.iter().enumerate() {
        for r in cube.lower[0] + 1..=cube.upper[0] {
            for g in cube.lower[1] + 1..=cube.upper[1] {
                for b in cube.lower[2] + 1..=cube.upper[2] {
                    for a in cube.lower[3] + 1..=cube.upper[3] {
                        tags[cell_index([r, g, b, a])] = tag as u8;
                    }
                }
            }
        }
    }

    let palette = cubes
        .iter()
        .map(|cube| {
            let stats = moments.stats(cube);
            if stats.weight == 0 {
                Color8888::TRANSPARENT
            } else {
                stats.mean()
            }
        })
        .collect();
    let indices = pixels
        .iter()
        .map(|&pixel| tags[cell_index(pixel_cell(pixel))])
        .collect();

    Reduction { palette, indices }
}
