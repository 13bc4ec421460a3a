use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{
    ArcPrimitive, CirclePrimitive, ClipRect, LinePrimitive, PathPrimitive, TextPrimitive,
};

/// One entry of the ordered draw list. Later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Arc(ArcPrimitive),
    Circle(CirclePrimitive),
    Path(PathPrimitive),
    Text(TextPrimitive),
    /// Nested commands drawn only inside `clip`.
    Clipped {
        clip: ClipRect,
        commands: Vec<DrawCommand>,
    },
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Arc(arc) => arc.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Path(path) => path.validate(),
            Self::Text(text) => text.validate(),
            Self::Clipped { clip, commands } => {
                clip.validate()?;
                commands.iter().try_for_each(Self::validate)
            }
        }
    }
}

/// Per-kind primitive totals, nested clip groups flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub lines: usize,
    pub arcs: usize,
    pub circles: usize,
    pub paths: usize,
    pub texts: usize,
    pub clips: usize,
}

impl FrameStats {
    fn accumulate(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Line(_) => self.lines += 1,
                DrawCommand::Arc(_) => self.arcs += 1,
                DrawCommand::Circle(_) => self.circles += 1,
                DrawCommand::Path(_) => self.paths += 1,
                DrawCommand::Text(_) => self.texts += 1,
                DrawCommand::Clipped { commands, .. } => {
                    self.clips += 1;
                    self.accumulate(commands);
                }
            }
        }
    }
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.push(DrawCommand::Line(line));
    }

    pub fn push_arc(&mut self, arc: ArcPrimitive) {
        self.push(DrawCommand::Arc(arc));
    }

    pub fn push_circle(&mut self, circle: CirclePrimitive) {
        self.push(DrawCommand::Circle(circle));
    }

    pub fn push_path(&mut self, path: PathPrimitive) {
        self.push(DrawCommand::Path(path));
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.push(DrawCommand::Text(text));
    }

    /// Appends `commands` restricted to `clip`. Empty groups are skipped.
    pub fn push_clipped(&mut self, clip: ClipRect, commands: Vec<DrawCommand>) {
        if !commands.is_empty() {
            self.push(DrawCommand::Clipped { clip, commands });
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.ensure_valid()?;
        self.commands.iter().try_for_each(DrawCommand::validate)
    }

    #[must_use]
    pub fn stats(&self) -> FrameStats {
        let mut stats = FrameStats::default();
        stats.accumulate(&self.commands);
        stats
    }

    /// Every text primitive in draw order, including clipped ones.
    #[must_use]
    pub fn texts(&self) -> Vec<&TextPrimitive> {
        fn collect<'a>(commands: &'a [DrawCommand], out: &mut Vec<&'a TextPrimitive>) {
            for command in commands {
                match command {
                    DrawCommand::Text(text) => out.push(text),
                    DrawCommand::Clipped { commands, .. } => collect(commands, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.commands, &mut out);
        out
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
