use core::fmt;

/// An attribute on a start tag token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Value exactly as written between the quotes (empty when absent).
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// The structural events the tokenizer emits, in document order.
///
/// Only `StartTag`, `EndTag` and `Text` shape the tree. The others are
/// recognized so they can be skipped cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name attr="value">`, or `<name/>` with `self_closing` set.
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// Whether the tag ended in `/>`.
        self_closing: bool,
        /// Attributes in source order, last occurrence of each name only.
        attributes: Vec<Attribute>,
    },

    /// `</name>`. Attributes written on an end tag are parsed and dropped.
    EndTag {
        /// Lowercased tag name.
        name: String,
    },

    /// A maximal run of character data between other tokens.
    Text {
        /// The characters, undecoded.
        data: String,
    },

    /// `<!-- data -->`, or a bogus comment such as `<?xml ...>`.
    Comment {
        /// Everything between the delimiters.
        data: String,
    },

    /// `&#123;` or `&#x7B;`. Never decoded.
    CharacterReference {
        /// The reference without `&` and `;`, e.g. `#123` or `#x7B`.
        raw: String,
    },

    /// `&name;`. Never decoded.
    EntityReference {
        /// The reference name without `&` and `;`.
        name: String,
    },

    /// `<!DOCTYPE ...>`, `<![CDATA[...]]>` and other `<!...>` markup.
    Declaration {
        /// Everything between `<!` and `>`.
        data: String,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// An empty start tag token, filled in as the tag name is read.
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// An empty end tag token.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
        }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// Mutation helpers for use during tokenization.
    /// These panic if called on the wrong token variant, which indicates a bug
    /// in the tokenizer state machine.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token.
    pub fn append_to_tag_name(&mut self, c: char) {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => name.push(c),
            _ => panic!("append_to_tag_name called on non-tag token"),
        }
    }

    /// Mark a start tag as written `<name/>`. End tags ignore the flag.
    pub fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }

    /// Begin a new, empty attribute. End tags drop their attributes.
    pub fn start_new_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } = self {
            attributes.push(Attribute::new(String::new(), String::new()));
        }
    }

    /// Append to the name of the attribute being read.
    pub fn append_to_current_attribute_name(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.name.push(c);
        }
    }

    /// Append to the value of the attribute being read.
    pub fn append_to_current_attribute_value(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.value.push(c);
        }
    }

    /// Drop every attribute whose name appears again later on the tag, so the
    /// last occurrence wins.
    pub fn remove_duplicate_attributes(&mut self) {
        if let Self::StartTag { attributes, .. } = self {
            let mut seen: Vec<String> = Vec::with_capacity(attributes.len());
            attributes.reverse();
            attributes.retain(|attr| {
                if seen.contains(&attr.name) {
                    false
                } else {
                    seen.push(attr.name.clone());
                    true
                }
            });
            attributes.reverse();
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Text { data } => write!(f, "Text({})", data.escape_debug()),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::CharacterReference { raw } | Self::EntityReference { name: raw } => {
                write!(f, "&{raw};")
            }
            Self::Declaration { data } => write!(f, "<!{data}>"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
