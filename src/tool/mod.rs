mod settings;

pub use settings::ToolSettings;

/// The drawing tool driving pointer input on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToolType {
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Star,
    Polygon,
    Text,
    Callout,
}

impl ToolType {
    pub const ALL: [ToolType; 9] = [
        ToolType::Select,
        ToolType::Rectangle,
        ToolType::Ellipse,
        ToolType::Line,
        ToolType::Arrow,
        ToolType::Star,
        ToolType::Polygon,
        ToolType::Text,
        ToolType::Callout,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolType::Select => "Select",
            ToolType::Rectangle => "Rectangle",
            ToolType::Ellipse => "Ellipse",
            ToolType::Line => "Line",
            ToolType::Arrow => "Arrow",
            ToolType::Star => "Star",
            ToolType::Polygon => "Polygon",
            ToolType::Text => "Text",
            ToolType::Callout => "Callout",
        }
    }

    /// Whether pointer drags with this tool create a new object.
    pub fn creates_objects(self) -> bool {
        self != ToolType::Select
    }
}
