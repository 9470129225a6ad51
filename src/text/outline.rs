use std::fmt::Write as _;

use euclid::{Box2D, Point2D, Rect, Size2D, Transform2D, Vector2D};

/// Text layout space: points, origin on the first baseline, **Y-axis goes up**.
///
/// Glyph outlines are produced in this space and lines stack towards
/// negative y.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextSpace;

/// Destination rendering space: points, **Y-axis goes down**.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderSpace;

/// Marker for the two coordinate spaces an [`OutlinePath`] can live in.
pub trait OutlineSpace: Copy + Clone + Default + PartialEq + std::fmt::Debug + 'static {
    /// Whether y grows upwards in this space.
    const Y_UP: bool;
}

impl OutlineSpace for TextSpace {
    const Y_UP: bool = true;
}

impl OutlineSpace for RenderSpace {
    const Y_UP: bool = false;
}

pub type TextPoint = Point2D<f32, TextSpace>;
pub type TextVector = Vector2D<f32, TextSpace>;
pub type TextBox = Box2D<f32, TextSpace>;

pub type RenderPoint = Point2D<f32, RenderSpace>;
pub type RenderVector = Vector2D<f32, RenderSpace>;
pub type RenderSize = Size2D<f32, RenderSpace>;
pub type RenderRect = Rect<f32, RenderSpace>;
pub type RenderBox = Box2D<f32, RenderSpace>;

/// One drawing command of an [`OutlinePath`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment<U = TextSpace> {
    MoveTo(Point2D<f32, U>),
    LineTo(Point2D<f32, U>),
    QuadTo {
        ctrl: Point2D<f32, U>,
        to: Point2D<f32, U>,
    },
    CubicTo {
        ctrl1: Point2D<f32, U>,
        ctrl2: Point2D<f32, U>,
        to: Point2D<f32, U>,
    },
    Close,
}

impl<U: OutlineSpace> PathSegment<U> {
    /// Returns every point of the segment, control points included.
    fn points(&self) -> impl Iterator<Item = Point2D<f32, U>> {
        let (buf, len) = match *self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => ([p, p, p], 1),
            PathSegment::QuadTo { ctrl, to } => ([ctrl, to, to], 2),
            PathSegment::CubicTo { ctrl1, ctrl2, to } => ([ctrl1, ctrl2, to], 3),
            PathSegment::Close => ([Point2D::origin(); 3], 0),
        };
        buf.into_iter().take(len)
    }

    fn map<V>(&self, mut f: impl FnMut(Point2D<f32, U>) -> Point2D<f32, V>) -> PathSegment<V> {
        match *self {
            PathSegment::MoveTo(p) => PathSegment::MoveTo(f(p)),
            PathSegment::LineTo(p) => PathSegment::LineTo(f(p)),
            PathSegment::QuadTo { ctrl, to } => PathSegment::QuadTo {
                ctrl: f(ctrl),
                to: f(to),
            },
            PathSegment::CubicTo { ctrl1, ctrl2, to } => PathSegment::CubicTo {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                to: f(to),
            },
            PathSegment::Close => PathSegment::Close,
        }
    }
}

/// Conservative bounds of a slice of segments (control points included).
///
/// `None` when the slice carries no points.
pub fn segment_bounds<U: OutlineSpace>(segments: &[PathSegment<U>]) -> Option<Box2D<f32, U>> {
    let mut points = segments.iter().flat_map(PathSegment::points).peekable();
    points.peek()?;
    Some(Box2D::from_points(points))
}

/// Appendable vector path.
///
/// The unit parameter records which coordinate space the path lives in so a
/// glyph-space outline can't be handed to a renderer by mistake.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlinePath<U = TextSpace> {
    segments: Vec<PathSegment<U>>,
}

impl<U: OutlineSpace> Default for OutlinePath<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: OutlineSpace> OutlinePath<U> {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn from_segments(segments: Vec<PathSegment<U>>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment<U>] {
        &self.segments
    }

    /// `true` when the path has no segments at all.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Number of contours, i.e. `MoveTo` commands.
    pub fn contour_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::MoveTo(_)))
            .count()
    }

    pub fn move_to(&mut self, to: Point2D<f32, U>) {
        self.segments.push(PathSegment::MoveTo(to));
    }

    pub fn line_to(&mut self, to: Point2D<f32, U>) {
        self.segments.push(PathSegment::LineTo(to));
    }

    pub fn quad_to(&mut self, ctrl: Point2D<f32, U>, to: Point2D<f32, U>) {
        self.segments.push(PathSegment::QuadTo { ctrl, to });
    }

    pub fn cubic_to(
        &mut self,
        ctrl1: Point2D<f32, U>,
        ctrl2: Point2D<f32, U>,
        to: Point2D<f32, U>,
    ) {
        self.segments.push(PathSegment::CubicTo { ctrl1, ctrl2, to });
    }

    pub fn close(&mut self) {
        self.segments.push(PathSegment::Close);
    }

    /// Appends `other` unchanged.
    pub fn append(&mut self, other: &OutlinePath<U>) {
        self.segments.extend_from_slice(&other.segments);
    }

    /// Appends `other` shifted by `offset`.
    pub fn append_translated(&mut self, other: &OutlinePath<U>, offset: Vector2D<f32, U>) {
        self.segments
            .extend(other.segments.iter().map(|s| s.map(|p| p + offset)));
    }

    pub fn translate(&mut self, offset: Vector2D<f32, U>) {
        for segment in &mut self.segments {
            *segment = segment.map(|p| p + offset);
        }
    }

    /// Maps every point through `transform`, possibly into another space.
    pub fn transformed<V: OutlineSpace>(
        &self,
        transform: &Transform2D<f32, U, V>,
    ) -> OutlinePath<V> {
        OutlinePath {
            segments: self
                .segments
                .iter()
                .map(|s| s.map(|p| transform.transform_point(p)))
                .collect(),
        }
    }

    /// Bounding box of every point, control points included.
    ///
    /// This is the same box a platform path reports as its "bounding box of
    /// path", which is what normalization centers on.
    pub fn bounds(&self) -> Option<Box2D<f32, U>> {
        segment_bounds(&self.segments)
    }

    /// Serializes the path as SVG path data (`d` attribute).
    pub fn to_svg_path_data(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing into a String never fails.
            let _ = match *segment {
                PathSegment::MoveTo(p) => write!(out, "M{} {}", p.x, p.y),
                PathSegment::LineTo(p) => write!(out, "L{} {}", p.x, p.y),
                PathSegment::QuadTo { ctrl, to } => {
                    write!(out, "Q{} {} {} {}", ctrl.x, ctrl.y, to.x, to.y)
                }
                PathSegment::CubicTo { ctrl1, ctrl2, to } => write!(
                    out,
                    "C{} {} {} {} {} {}",
                    ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                ),
                PathSegment::Close => write!(out, "Z"),
            };
        }
        out
    }
}

/// Collects a `ttf_parser` glyph outline into an [`OutlinePath`] in points.
///
/// Font units are multiplied by `scale`; the y-up orientation of the font is
/// kept, so the result lives in [`TextSpace`].
pub(crate) struct ScaledOutlineSink {
    path: OutlinePath<TextSpace>,
    scale: f32,
}

impl ScaledOutlineSink {
    pub(crate) fn new(scale: f32) -> Self {
        Self {
            path: OutlinePath::new(),
            scale,
        }
    }

    pub(crate) fn finish(self) -> OutlinePath<TextSpace> {
        self.path
    }

    fn point(&self, x: f32, y: f32) -> TextPoint {
        TextPoint::new(x * self.scale, y * self.scale)
    }
}

impl rustybuzz::ttf_parser::OutlineBuilder for ScaledOutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (ctrl, to) = (self.point(x1, y1), self.point(x, y));
        self.path.quad_to(ctrl, to);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (ctrl1, ctrl2, to) = (self.point(x1, y1), self.point(x2, y2), self.point(x, y));
        self.path.cubic_to(ctrl1, ctrl2, to);
    }

    fn close(&mut self) {
        self.path.close();
    }
}
