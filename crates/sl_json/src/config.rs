// -----------------------------------------------------------------------------
// Style

/// How record members and map entries are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    /// `{name: value}`, unquoted member names followed by a space. Map
    /// entries keep their quoted keys: `{"key": value}`.
    ///
    /// Meant for log lines. The output is not a strict JSON document once
    /// it contains a record.
    #[default]
    Human,
    /// `{"name":value}`, strict JSON.
    Strict,
}

// -----------------------------------------------------------------------------
// EncoderConfig

/// Options of an [`Encoder`](crate::Encoder).
///
/// # Examples
///
/// ```
/// use sl_json::{EncoderConfig, Style};
///
/// let config = EncoderConfig::new()
///     .with_style(Style::Strict)
///     .with_escape_html(true);
///
/// assert_eq!(config.style(), Style::Strict);
/// assert_eq!(config.cycle_check_depth(), 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    style: Style,
    escape_html: bool,
    cycle_check_depth: usize,
}

impl Default for EncoderConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderConfig {
    /// Pointer nesting level above which identities are tracked.
    pub const DEFAULT_CYCLE_CHECK_DEPTH: usize = 256;

    /// Human style, no HTML escaping.
    #[inline]
    pub const fn new() -> Self {
        Self {
            style: Style::Human,
            escape_html: false,
            cycle_check_depth: Self::DEFAULT_CYCLE_CHECK_DEPTH,
        }
    }

    #[inline]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Also escape `<`, `>` and `&` in strings and embedded output.
    #[inline]
    pub const fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    /// Sets the nesting level of lists, maps and shared pointers above
    /// which the cycle guard starts tracking identities.
    ///
    /// `0` checks from the first level.
    #[inline]
    pub const fn with_cycle_check_depth(mut self, depth: usize) -> Self {
        self.cycle_check_depth = depth;
        self
    }

    #[inline]
    pub const fn style(&self) -> Style {
        self.style
    }

    #[inline]
    pub const fn escape_html(&self) -> bool {
        self.escape_html
    }

    #[inline]
    pub const fn cycle_check_depth(&self) -> usize {
        self.cycle_check_depth
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{EncoderConfig, Style};

    #[test]
    fn defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config, EncoderConfig::new());
        assert_eq!(config.style(), Style::Human);
        assert!(!config.escape_html());
        assert_eq!(config.cycle_check_depth(), EncoderConfig::DEFAULT_CYCLE_CHECK_DEPTH);
    }

    #[test]
    fn builders_only_touch_their_option() {
        let config = EncoderConfig::new().with_cycle_check_depth(0);
        assert_eq!(config.cycle_check_depth(), 0);
        assert_eq!(config.style(), Style::Human);
        assert!(!config.with_style(Style::Strict).escape_html());
    }
}
