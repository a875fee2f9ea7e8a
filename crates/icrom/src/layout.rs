//! Board layout: places the word and bit lines that encode the data.
//!
//! # Overview
//!
//! Word (drive) lines run horizontally on the drive layer, word 0 at the
//! top. At every bit column a word line makes a rectangular jog: up at the
//! column's *zero* track, across, and down at its *one* track. Bit (sense)
//! lines run vertically on the sense layer. Crossing word `w`, the sense
//! line of bit `b` follows the one track when the stored bit is 1 and the
//! zero track otherwise, so it lies along one of the two jog legs and
//! couples to that word with the corresponding polarity. Between rows the
//! sense line steps sideways when consecutive words store different values.
//! After the last row it returns to its pads along a third track.
//!
//! Each column holds three tracks a third of the sense pitch apart:
//!
//! ```text
//!   return   zero   one
//!     r_b    z_b    o_b      z_b is the column centre
//! ```
//!
//! Even bit columns have their pads above the array, odd ones below; the
//! odd geometry is the even one mirrored about the board centre. Word pads
//! alternate between an inner and an outer column on both sides so
//! neighbouring pads keep their clearance.
//!
//! All coordinates are millimetres with the origin at the bottom-left
//! corner of the board.

use log::{debug, info, trace};

use icrom_core::{
    eagle::{Align, Board, BoardFile, Rectangle, Signal, Text, Via, Wire, layer},
    geometry::{Bounds, Point},
};

use crate::{
    config::BoardParams,
    data::{DataError, RomData},
    error::IcromError,
};

/// Points closer than this are treated as equal.
const EPSILON: f64 = 1e-9;

/// Derived dimensions shared by every line of the array.
#[derive(Debug, Clone)]
pub(crate) struct Geometry {
    words: usize,
    bits: usize,
    drive_pitch: f64,
    drive_trace: f64,
    drive_layer: u8,
    coupling: f64,
    sense_pitch: f64,
    sense_trace: f64,
    sense_layer: u8,
    /// Distance between neighbouring tracks of a column.
    track_step: f64,
    pad_drill: f64,
    pad_diameter: f64,
    /// Centre-to-centre distance between staggered pads.
    pad_pitch: f64,
    center: Point,
}

impl Geometry {
    pub(crate) fn new(params: &BoardParams) -> Self {
        let pad_diameter = params.pad_drill + 2.0 * params.pad_annular_ring;
        Self {
            words: params.words,
            bits: params.bits,
            drive_pitch: params.drive_pitch,
            drive_trace: params.drive_trace,
            drive_layer: params.drive_layer,
            coupling: params.coupling,
            sense_pitch: params.sense_pitch,
            sense_trace: params.sense_trace,
            sense_layer: params.sense_layer,
            track_step: params.sense_pitch / 3.0,
            pad_drill: params.pad_drill,
            pad_diameter,
            pad_pitch: pad_diameter + params.pad_clearance,
            center: Point::new(params.width / 2.0, params.length / 2.0),
        }
    }

    /// Centre line of word `word`.
    fn row(&self, word: usize) -> f64 {
        let offset = (self.words as f64 - 1.0) / 2.0 - word as f64;
        self.center.y() + offset * self.drive_pitch
    }

    /// Centre of bit column `bit`, which is also its zero track.
    fn column(&self, bit: usize) -> f64 {
        let offset = (self.bits as f64 - 1.0) / 2.0 - bit as f64;
        self.center.x() + offset * self.sense_pitch
    }

    fn return_track(&self, bit: usize) -> f64 {
        self.column(bit) - self.track_step
    }

    fn zero_track(&self, bit: usize) -> f64 {
        self.column(bit)
    }

    fn one_track(&self, bit: usize) -> f64 {
        self.column(bit) + self.track_step
    }

    fn top(&self) -> f64 {
        self.row(0) + self.drive_pitch / 2.0
    }

    fn bottom(&self) -> f64 {
        self.row(self.words - 1) - self.drive_pitch / 2.0
    }

    fn left(&self) -> f64 {
        self.return_track(self.bits - 1) - self.sense_pitch
    }

    fn right(&self) -> f64 {
        self.one_track(0) + self.sense_pitch
    }

    /// Region crossed by the word and bit lines.
    pub(crate) fn array_bounds(&self) -> Bounds {
        Bounds::new(
            Point::new(self.left(), self.bottom()),
            Point::new(self.right(), self.top()),
        )
    }

    /// Region covered by the array and all of its pads.
    pub(crate) fn footprint(&self) -> Bounds {
        let radius = self.pad_diameter / 2.0;
        let word_stagger = if self.words > 1 { 1.5 } else { 0.5 };
        let horizontal = word_stagger * self.pad_pitch + radius;
        let vertical = self.track_step + 1.5 * self.pad_pitch + radius;
        // a single column has no mirrored pads below the array
        let below = if self.bits > 1 { vertical } else { 0.0 };

        Bounds::new(
            Point::new(self.left() - horizontal, self.bottom() - below),
            Point::new(self.right() + horizontal, self.top() + vertical),
        )
    }

    fn pad(&self, at: Point) -> Via {
        Via::new(at, self.pad_drill).with_diameter(self.pad_diameter)
    }

    /// Distance from the array edge at which word pads sit: inner column for
    /// even words, outer column for odd ones.
    fn word_pad_offset(&self, word: usize) -> f64 {
        let k = if word % 2 == 0 { 1.0 } else { 3.0 };
        k * self.pad_pitch / 2.0
    }

    /// Signal and return pad positions of an even column, before mirroring.
    fn bit_pads(&self, bit: usize) -> (Point, Point) {
        let x = self.column(bit);
        let base = self.top() + self.track_step;
        (
            Point::new(x + self.sense_pitch / 2.0, base + 1.5 * self.pad_pitch),
            Point::new(x - self.sense_pitch / 2.0, base + 0.5 * self.pad_pitch),
        )
    }

    /// Maps a point of the even-column geometry onto `bit`'s column.
    fn orient(&self, bit: usize, point: Point) -> Point {
        if bit % 2 == 0 {
            point
        } else {
            point.mirror_y(self.center.y())
        }
    }

    /// The track bit line `bit` follows across `word`.
    fn crossing_track(&self, data: &RomData, word: usize, bit: usize) -> f64 {
        if data.get(word, bit) {
            self.one_track(bit)
        } else {
            self.zero_track(bit)
        }
    }
}

/// Counts describing a generated board.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSummary {
    words: usize,
    bits: usize,
    nets: usize,
    wires: usize,
    vias: usize,
    labels: usize,
    array_bounds: Bounds,
}

impl LayoutSummary {
    /// Summarizes `board` as generated from `params`.
    pub fn of(params: &BoardParams, board: &Board) -> Self {
        let signals = board.signals();
        Self {
            words: params.words,
            bits: params.bits,
            nets: signals.len(),
            wires: signals.iter().map(|s| s.wires().len()).sum(),
            vias: signals.iter().map(|s| s.vias().len()).sum(),
            labels: board.plain().texts().len(),
            array_bounds: Geometry::new(params).array_bounds(),
        }
    }

    pub fn words(&self) -> usize {
        self.words
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Number of named signals.
    pub fn nets(&self) -> usize {
        self.nets
    }

    /// Number of copper wires over all signals.
    pub fn wires(&self) -> usize {
        self.wires
    }

    /// Number of vias over all signals.
    pub fn vias(&self) -> usize {
        self.vias
    }

    /// Number of texts on the board, title included.
    pub fn labels(&self) -> usize {
        self.labels
    }

    /// Region crossed by the word and bit lines.
    pub fn array_bounds(&self) -> Bounds {
        self.array_bounds
    }
}

/// Lays out the whole board for `data`.
///
/// The board carries one signal per word (`word000`, `word001`, ...) followed
/// by one per bit (`bit000`, ...), the board outline, and optionally labels,
/// a title and a documentation frame around the array.
///
/// # Errors
///
/// Returns [`IcromError::Data`] if `data` does not have the configured
/// dimensions.
pub fn generate(params: &BoardParams, data: &RomData) -> Result<BoardFile, IcromError> {
    if data.words() != params.words || data.bits() != params.bits {
        return Err(DataError::SizeMismatch {
            expected_bits: params.words.saturating_mul(params.bits),
            actual_bits: data.words() * data.bits(),
        }
        .into());
    }

    let geometry = Geometry::new(params);
    info!(words = params.words, bits = params.bits; "Generating board layout");
    debug!(
        sense_space = params.display(geometry.track_step - geometry.sense_trace),
        track_step = params.display(geometry.track_step),
        pad_pitch = params.display(geometry.pad_pitch);
        "Derived geometry"
    );

    let mut board = Board::new();
    board.add_rectangular_outline(
        Point::new(0.0, 0.0),
        Point::new(params.width, params.length),
    );
    if params.array_frame {
        let bounds = geometry.array_bounds();
        board.plain_mut().add_rectangle(Rectangle::new(
            bounds.min_point(),
            bounds.max_point(),
            layer::T_DOCU,
        ));
    }

    for word in 0..params.words {
        board.add_signal(word_line(&geometry, word));
    }
    for bit in 0..params.bits {
        trace!(
            bit,
            return_track = geometry.return_track(bit),
            zero_track = geometry.zero_track(bit),
            one_track = geometry.one_track(bit);
            "Bit column"
        );
        board.add_signal(bit_line(&geometry, data, bit));
    }

    add_labels(&geometry, params, &mut board);

    let expected = params.words + params.bits;
    if board.signals().len() != expected {
        return Err(IcromError::Layout(format!(
            "generated {} nets, expected {expected}",
            board.signals().len()
        )));
    }

    let summary = LayoutSummary::of(params, &board);
    info!(
        nets = summary.nets(),
        wires = summary.wires(),
        vias = summary.vias(),
        labels = summary.labels();
        "Board layout generated"
    );
    Ok(BoardFile::new(board))
}

fn word_line(geometry: &Geometry, word: usize) -> Signal {
    let y = geometry.row(word);
    let baseline = y - geometry.coupling / 2.0;
    let jog = y + geometry.coupling / 2.0;
    let offset = geometry.word_pad_offset(word);
    let left_pad = Point::new(geometry.left() - offset, baseline);
    let right_pad = Point::new(geometry.right() + offset, baseline);

    let mut points = Vec::with_capacity(4 * geometry.bits + 2);
    points.push(left_pad);
    // left to right, highest bit first
    for bit in (0..geometry.bits).rev() {
        let zero = geometry.zero_track(bit);
        let one = geometry.one_track(bit);
        points.extend([
            Point::new(zero, baseline),
            Point::new(zero, jog),
            Point::new(one, jog),
            Point::new(one, baseline),
        ]);
    }
    points.push(right_pad);

    let mut signal = Signal::new(format!("word{word:03}"));
    add_polyline(
        &mut signal,
        &points,
        geometry.drive_trace,
        geometry.drive_layer,
    );
    signal.add_via(geometry.pad(left_pad));
    signal.add_via(geometry.pad(right_pad));
    signal
}

fn bit_line(geometry: &Geometry, data: &RomData, bit: usize) -> Signal {
    let words = geometry.words;
    // odd columns walk the words bottom-up in the unmirrored frame
    let word_at = |row: usize| if bit % 2 == 0 { row } else { words - 1 - row };
    let track = |row: usize| geometry.crossing_track(data, word_at(row), bit);

    let feed = geometry.top() + geometry.track_step;
    let (signal_pad, return_pad) = geometry.bit_pads(bit);
    let first = track(0);

    let mut points = vec![
        signal_pad,
        Point::new(signal_pad.x(), feed),
        Point::new(first, feed),
    ];
    // a vertical run only ends where the next word needs the other track
    for row in 0..words.saturating_sub(1) {
        let current = track(row);
        let next = track(row + 1);
        if (next - current).abs() > EPSILON {
            let gap = geometry.row(row) - geometry.drive_pitch / 2.0;
            points.push(Point::new(current, gap));
            points.push(Point::new(next, gap));
        }
    }
    points.push(Point::new(track(words - 1), geometry.bottom()));
    let return_track = geometry.return_track(bit);
    points.extend([
        Point::new(return_track, geometry.bottom()),
        Point::new(return_track, return_pad.y()),
        return_pad,
    ]);

    let points: Vec<_> = points
        .into_iter()
        .map(|point| geometry.orient(bit, point))
        .collect();

    let mut signal = Signal::new(format!("bit{bit:03}"));
    add_polyline(
        &mut signal,
        &points,
        geometry.sense_trace,
        geometry.sense_layer,
    );
    signal.add_via(geometry.pad(geometry.orient(bit, signal_pad)));
    signal.add_via(geometry.pad(geometry.orient(bit, return_pad)));
    signal
}

/// Adds one wire per consecutive pair of distinct points.
fn add_polyline(signal: &mut Signal, points: &[Point], width: f64, layer: u8) {
    for pair in points.windows(2) {
        if !pair[0].approx_eq(pair[1], EPSILON) {
            signal.add_wire(Wire::new(pair[0], pair[1], width, layer));
        }
    }
}

fn add_labels(geometry: &Geometry, params: &BoardParams, board: &mut Board) {
    let labels = &params.labels;
    let text = |at: Point, value: String| {
        Text::new(at, labels.size, labels.layer, value).with_ratio(labels.ratio)
    };

    if labels.enabled {
        let x = geometry.left() - 2.5 * geometry.pad_pitch;
        for word in 0..geometry.words {
            let at = Point::new(x, geometry.row(word) - geometry.coupling / 2.0);
            board
                .plain_mut()
                .add_text(text(at, format!("W{word}")).with_align(Align::CenterRight));
        }
        for bit in 0..geometry.bits {
            let (signal_pad, _) = geometry.bit_pads(bit);
            let at = geometry.orient(
                bit,
                Point::new(signal_pad.x(), signal_pad.y() + geometry.pad_pitch),
            );
            board
                .plain_mut()
                .add_text(text(at, format!("B{bit}")).with_align(Align::Center));
        }
    }

    if let Some(title) = &labels.title {
        let inset = geometry.pad_pitch;
        board
            .plain_mut()
            .add_text(text(Point::new(inset, inset), title.clone()));
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::config::AppConfig;

    fn params(words: usize, bits: usize) -> BoardParams {
        let mut config = AppConfig::default();
        config.array_mut().set_words(words);
        config.array_mut().set_bits(bits);
        config.resolve().unwrap()
    }

    fn checkerboard(words: usize, bits: usize) -> RomData {
        RomData::from_rows((0..words).map(|w| (0..bits).map(move |b| (w + b) % 2 == 1))).unwrap()
    }

    /// Sense wires that run vertically through the centre line of `word`.
    fn crossings(geometry: &Geometry, signal: &Signal, word: usize, bit: usize) -> Vec<f64> {
        let y = geometry.row(word);
        let return_track = geometry.return_track(bit);
        signal
            .wires()
            .iter()
            .filter(|w| w.is_vertical() && (w.p1().x() - return_track).abs() > EPSILON)
            .filter(|w| w.p1().y().min(w.p2().y()) < y && w.p1().y().max(w.p2().y()) > y)
            .map(|w| w.p1().x())
            .collect()
    }

    #[test]
    fn test_net_count_and_names() {
        let params = params(3, 5);
        let file = generate(&params, &checkerboard(3, 5)).unwrap();
        let names: Vec<_> = file.drawing().signals().iter().map(Signal::name).collect();
        assert_eq!(names.len(), 8);
        assert_eq!(&names[..3], ["word000", "word001", "word002"]);
        assert_eq!(names[3], "bit000");
        assert_eq!(names[7], "bit004");
    }

    #[test]
    fn test_word_line_shape() {
        let params = params(4, 6);
        let geometry = Geometry::new(&params);
        let signal = word_line(&geometry, 1);

        assert_eq!(signal.wires().len(), 4 * 6 + 1);
        assert_eq!(signal.vias().len(), 2);
        assert!(signal.wires().iter().all(|w| w.layer() == params.drive_layer));

        let verticals = signal.wires().iter().filter(|w| w.is_vertical()).count();
        assert_eq!(verticals, 2 * 6);
        for wire in signal.wires().iter().filter(|w| w.is_vertical()) {
            assert!(approx_eq!(f64, wire.length(), params.coupling, epsilon = 1e-9));
        }
    }

    #[test]
    fn test_word_pads_are_staggered() {
        let params = params(4, 4);
        let geometry = Geometry::new(&params);
        let even = word_line(&geometry, 0).vias()[0].at();
        let odd = word_line(&geometry, 1).vias()[0].at();
        assert!(approx_eq!(
            f64,
            even.x() - odd.x(),
            geometry.pad_pitch,
            epsilon = 1e-9
        ));
    }

    #[test]
    fn test_bit_line_follows_data() {
        let params = params(6, 4);
        let geometry = Geometry::new(&params);
        let data = checkerboard(6, 4);

        for bit in 0..4 {
            let signal = bit_line(&geometry, &data, bit);
            for word in 0..6 {
                let expected = geometry.crossing_track(&data, word, bit);
                let found = crossings(&geometry, &signal, word, bit);
                assert_eq!(found.len(), 1, "bit {bit} word {word}: {found:?}");
                assert!(approx_eq!(f64, found[0], expected, epsilon = 1e-9));
            }
        }
    }

    #[test]
    fn test_constant_column_has_no_jogs() {
        let params = params(5, 2);
        let geometry = Geometry::new(&params);
        let data = RomData::zeroed(5, 2).unwrap();
        let signal = bit_line(&geometry, &data, 0);

        // pad drop, feed, one straight run, bottom return, riser, pad stub
        assert_eq!(signal.wires().len(), 6);
        assert_eq!(signal.vias().len(), 2);
    }

    #[test]
    fn test_bit_pads_alternate_sides() {
        let params = params(4, 4);
        let geometry = Geometry::new(&params);
        let data = RomData::zeroed(4, 4).unwrap();
        let top = geometry.top();
        let bottom = geometry.bottom();

        for bit in 0..4 {
            let signal = bit_line(&geometry, &data, bit);
            for via in signal.vias() {
                if bit % 2 == 0 {
                    assert!(via.at().y() > top, "bit {bit}");
                } else {
                    assert!(via.at().y() < bottom, "bit {bit}");
                }
            }
        }
    }

    #[test]
    fn test_no_zero_length_wires() {
        let params = params(7, 5);
        let file = generate(&params, &checkerboard(7, 5)).unwrap();
        for signal in file.drawing().signals() {
            for wire in signal.wires() {
                assert!(wire.length() > EPSILON, "{}: {wire:?}", signal.name());
            }
        }
    }

    #[test]
    fn test_copper_stays_inside_footprint() {
        let params = params(8, 8);
        let geometry = Geometry::new(&params);
        let footprint = geometry.footprint().expand(1e-9);
        let file = generate(&params, &checkerboard(8, 8)).unwrap();

        for signal in file.drawing().signals() {
            for wire in signal.wires() {
                assert!(footprint.contains(wire.p1()) && footprint.contains(wire.p2()));
            }
            for via in signal.vias() {
                assert!(footprint.contains(via.at()));
            }
        }
    }

    #[test]
    fn test_labels_and_title() {
        let mut config = AppConfig::default();
        config.array_mut().set_words(3);
        config.array_mut().set_bits(2);
        config.labels_mut().set_title(Some("ROM 0".to_string()));
        let params = config.resolve().unwrap();
        let file = generate(&params, &RomData::zeroed(3, 2).unwrap()).unwrap();

        let texts: Vec<_> = file.drawing().plain().texts().iter().map(Text::value).collect();
        assert_eq!(texts, ["W0", "W1", "W2", "B0", "B1", "ROM 0"]);

        config.labels_mut().set_enabled(false);
        config.labels_mut().set_title(None);
        let params = config.resolve().unwrap();
        let file = generate(&params, &RomData::zeroed(3, 2).unwrap()).unwrap();
        assert!(file.drawing().plain().texts().is_empty());
    }

    #[test]
    fn test_outline_and_frame() {
        let mut config = AppConfig::default();
        config.array_mut().set_words(2);
        config.array_mut().set_bits(2);
        let params = config.resolve().unwrap();
        let file = generate(&params, &RomData::zeroed(2, 2).unwrap()).unwrap();
        let plain = file.drawing().plain();
        assert_eq!(plain.wires().len(), 4);
        assert!(plain.wires().iter().all(|w| w.layer() == layer::DIMENSION));
        assert_eq!(plain.rectangles().len(), 1);
        assert_eq!(plain.rectangles()[0].layer(), layer::T_DOCU);

        config.outline_mut().set_array_frame(false);
        let params = config.resolve().unwrap();
        let file = generate(&params, &RomData::zeroed(2, 2).unwrap()).unwrap();
        assert!(file.drawing().plain().rectangles().is_empty());
    }

    #[test]
    fn test_data_dimensions_must_match() {
        let params = params(4, 4);
        let err = generate(&params, &RomData::zeroed(4, 3).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            IcromError::Data(DataError::SizeMismatch {
                expected_bits: 16,
                actual_bits: 12
            })
        ));
    }

    #[test]
    fn test_array_is_centred() {
        let params = params(64, 64);
        let geometry = Geometry::new(&params);
        let bounds = geometry.array_bounds();
        let center = bounds.center();
        assert!(approx_eq!(f64, center.y(), params.length / 2.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, center.x(), params.width / 2.0, epsilon = 1e-9));
    }

    #[test]
    fn test_summary_counts() {
        let params = params(3, 4);
        let file = generate(&params, &checkerboard(3, 4)).unwrap();
        let summary = LayoutSummary::of(&params, file.drawing());
        assert_eq!(summary.nets(), 7);
        assert_eq!(summary.vias(), 14);
        assert_eq!(summary.labels(), 7);
        assert!(summary.wires() >= 3 * (4 * 4 + 1));
    }
}
