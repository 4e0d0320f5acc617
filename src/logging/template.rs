//! Runtime message templates
//!
//! Placeholders are `{}` (next argument) or `{N}` (argument N). `{{` and `}}`
//! are literal braces. Extra arguments are ignored.

use std::fmt::{self, Display, Write};

/// Why a template could not be rendered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("placeholder refers to argument {index} but only {available} were given")]
    MissingArgument { index: usize, available: usize },

    #[error("unclosed placeholder starting at byte {0}")]
    UnclosedPlaceholder(usize),

    #[error("unmatched '}}' at byte {0}")]
    UnmatchedBrace(usize),

    #[error("invalid placeholder '{{{0}}}'")]
    InvalidPlaceholder(String),

    #[error("an argument failed to format itself")]
    Display,
}

impl From<fmt::Error> for TemplateError {
    fn from(_: fmt::Error) -> Self {
        TemplateError::Display
    }
}

/// Substitute `args` into `template`
pub fn render(template: &str, args: &[&dyn Display]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut next_arg = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let mut spec = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(c);
                }
                if !closed {
                    return Err(TemplateError::UnclosedPlaceholder(pos));
                }

                let index = if spec.is_empty() {
                    let index = next_arg;
                    next_arg += 1;
                    index
                } else {
                    spec.trim()
                        .parse::<usize>()
                        .map_err(|_| TemplateError::InvalidPlaceholder(spec.clone()))?
                };

                let arg = args.get(index).ok_or(TemplateError::MissingArgument {
                    index,
                    available: args.len(),
                })?;
                write!(out, "{}", arg)?;
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_none() {
                    return Err(TemplateError::UnmatchedBrace(pos));
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
