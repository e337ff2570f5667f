//! Framework-independent reply content

/// Accent colour of an embed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedColor {
    Blue,
    Green,
    Red,
    Gold,
}

impl EmbedColor {
    /// RGB value as Discord expects it
    pub fn rgb(&self) -> u32 {
        match self {
            EmbedColor::Blue => 0x3498db,
            EmbedColor::Green => 0x2ecc71,
            EmbedColor::Red => 0xe74c3c,
            EmbedColor::Gold => 0xf1c40f,
        }
    }
}

/// A titled field inside an embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Rich reply rendered as an embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReply {
    pub title: String,
    pub description: String,
    pub color: EmbedColor,
    pub footer: Option<String>,
    pub fields: Vec<EmbedField>,
}

impl EmbedReply {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: EmbedColor) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            footer: None,
            fields: Vec::new(),
        }
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }
}

/// What a command sends back to the channel it was invoked in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Embed(EmbedReply),
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Reply::Text(content.into())
    }

    /// Plain text content, if this is a text reply
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) => Some(text),
            Reply::Embed(_) => None,
        }
    }

    /// Embed content, if this is an embed reply
    pub fn as_embed(&self) -> Option<&EmbedReply> {
        match self {
            Reply::Text(_) => None,
            Reply::Embed(embed) => Some(embed),
        }
    }
}

impl From<EmbedReply> for Reply {
    fn from(embed: EmbedReply) -> Self {
        Reply::Embed(embed)
    }
}
