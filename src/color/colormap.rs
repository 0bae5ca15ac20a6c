//! Scalar-to-color lookup tables for single-channel panels
//!
//! Each colormap is a list of evenly spaced anchor colors that are linearly
//! interpolated. Names follow the usual plotting-library identifiers
//! (`Reds`, `GnBu`, `gray`, ...); appending `_r` reverses a map.

use std::fmt;
use std::str::FromStr;

use crate::error::WorkshopError;

/// Base colormap families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColormapKind {
    Reds,
    Greens,
    Blues,
    GnBu,
    RdPu,
    YlOrBr,
    Gray,
    Greys,
    Viridis,
}

/// A colormap identifier, optionally reversed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colormap {
    pub kind: ColormapKind,
    pub reversed: bool,
}

const REDS: [u32; 9] = [
    0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d,
];
const GREENS: [u32; 9] = [
    0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b,
];
const BLUES: [u32; 9] = [
    0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
];
const GNBU: [u32; 9] = [
    0xf7fcf0, 0xe0f3db, 0xccebc5, 0xa8ddb5, 0x7bccc4, 0x4eb3d3, 0x2b8cbe, 0x0868ac, 0x084081,
];
const RDPU: [u32; 9] = [
    0xfff7f3, 0xfde0dd, 0xfcc5c0, 0xfa9fb5, 0xf768a1, 0xdd3497, 0xae017e, 0x7a0177, 0x49006a,
];
const YLORBR: [u32; 9] = [
    0xffffe5, 0xfff7bc, 0xfee391, 0xfec44f, 0xfe9929, 0xec7014, 0xcc4c02, 0x993404, 0x662506,
];
const GRAY: [u32; 2] = [0x000000, 0xffffff];
const GREYS: [u32; 9] = [
    0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373, 0x525252, 0x252525, 0x000000,
];
const VIRIDIS: [u32; 9] = [
    0x440154, 0x472d7b, 0x3b528b, 0x2c728e, 0x21918c, 0x28ae80, 0x5ec962, 0xaddc30, 0xfde725,
];

impl ColormapKind {
    pub const ALL: [ColormapKind; 9] = [
        ColormapKind::Reds,
        ColormapKind::Greens,
        ColormapKind::Blues,
        ColormapKind::GnBu,
        ColormapKind::RdPu,
        ColormapKind::YlOrBr,
        ColormapKind::Gray,
        ColormapKind::Greys,
        ColormapKind::Viridis,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColormapKind::Reds => "Reds",
            ColormapKind::Greens => "Greens",
            ColormapKind::Blues => "Blues",
            ColormapKind::GnBu => "GnBu",
            ColormapKind::RdPu => "RdPu",
            ColormapKind::YlOrBr => "YlOrBr",
            ColormapKind::Gray => "gray",
            ColormapKind::Greys => "Greys",
            ColormapKind::Viridis => "viridis",
        }
    }

    fn anchors(&self) -> &'static [u32] {
        match self {
            ColormapKind::Reds => &REDS,
            ColormapKind::Greens => &GREENS,
            ColormapKind::Blues => &BLUES,
            ColormapKind::GnBu => &GNBU,
            ColormapKind::RdPu => &RDPU,
            ColormapKind::YlOrBr => &YLORBR,
            ColormapKind::Gray => &GRAY,
            ColormapKind::Greys => &GREYS,
            ColormapKind::Viridis => &VIRIDIS,
        }
    }
}

fn unpack(rgb: u32) -> [f32; 3] {
    [
        ((rgb >> 16) & 0xff) as f32,
        ((rgb >> 8) & 0xff) as f32,
        (rgb & 0xff) as f32,
    ]
}

impl Colormap {
    pub const fn new(kind: ColormapKind) -> Self {
        Self {
            kind,
            reversed: false,
        }
    }

    pub const REDS: Colormap = Colormap::new(ColormapKind::Reds);
    pub const GREENS: Colormap = Colormap::new(ColormapKind::Greens);
    pub const BLUES: Colormap = Colormap::new(ColormapKind::Blues);
    pub const GNBU: Colormap = Colormap::new(ColormapKind::GnBu);
    pub const RDPU: Colormap = Colormap::new(ColormapKind::RdPu);
    pub const YLORBR: Colormap = Colormap::new(ColormapKind::YlOrBr);
    pub const GRAY: Colormap = Colormap::new(ColormapKind::Gray);
    pub const VIRIDIS: Colormap = Colormap::new(ColormapKind::Viridis);

    pub fn reversed(self) -> Self {
        Self {
            reversed: !self.reversed,
            ..self
        }
    }

    /// Color for a normalized intensity in [0, 1]; out-of-range values clamp
    pub fn map(&self, t: f32) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };

        let anchors = self.kind.anchors();
        let segments = (anchors.len() - 1) as f32;
        let pos = t * segments;
        let idx = (pos.floor() as usize).min(anchors.len() - 2);
        let frac = pos - idx as f32;

        let lo = unpack(anchors[idx]);
        let hi = unpack(anchors[idx + 1]);
        let mut out = [0u8; 3];
        for c in 0..3 {
            out[c] = (lo[c] + (hi[c] - lo[c]) * frac).round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reversed {
            write!(f, "{}_r", self.kind.name())
        } else {
            f.write_str(self.kind.name())
        }
    }
}

impl FromStr for Colormap {
    type Err = WorkshopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, reversed) = match s.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (s, false),
        };

        let kind = match base {
            "gray" | "grey" => Some(ColormapKind::Gray),
            other => ColormapKind::ALL
                .iter()
                .copied()
                .find(|kind| kind.name() == other),
        }
        .ok_or_else(|| WorkshopError::InvalidColormap {
            name: s.to_string(),
        })?;

        Ok(Colormap { kind, reversed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_endpoints() {
        assert_eq!(Colormap::GRAY.map(0.0), [0, 0, 0]);
        assert_eq!(Colormap::GRAY.map(1.0), [255, 255, 255]);
        assert_eq!(Colormap::GRAY.map(0.5), [128, 128, 128]);
    }

    #[test]
    fn test_map_clamps_out_of_range() {
        assert_eq!(Colormap::GRAY.map(-3.0), [0, 0, 0]);
        assert_eq!(Colormap::GRAY.map(7.0), [255, 255, 255]);
    }

    #[test]
    fn test_reds_runs_light_to_dark() {
        assert_eq!(Colormap::REDS.map(0.0), [0xff, 0xf5, 0xf0]);
        assert_eq!(Colormap::REDS.map(1.0), [0x67, 0x00, 0x0d]);
    }

    #[test]
    fn test_reversed_map() {
        let reds_r = Colormap::REDS.reversed();
        assert_eq!(reds_r.map(0.0), Colormap::REDS.map(1.0));
        assert_eq!(reds_r.to_string(), "Reds_r");
        assert_eq!(reds_r.reversed(), Colormap::REDS);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Reds".parse::<Colormap>().unwrap(), Colormap::REDS);
        assert_eq!("gray".parse::<Colormap>().unwrap(), Colormap::GRAY);
        assert_eq!("grey".parse::<Colormap>().unwrap(), Colormap::GRAY);
        assert_eq!(
            "YlOrBr_r".parse::<Colormap>().unwrap(),
            Colormap::YLORBR.reversed()
        );
        assert!(matches!(
            "Rainbow".parse::<Colormap>(),
            Err(WorkshopError::InvalidColormap { .. })
        ));
    }

    #[test]
    fn test_display_round_trips_every_kind() {
        for kind in ColormapKind::ALL {
            let cmap = Colormap::new(kind);
            assert_eq!(cmap.to_string().parse::<Colormap>().unwrap(), cmap);
        }
    }
}
