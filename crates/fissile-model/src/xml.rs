//! Minimal indented XML emitter for engine input files

/// Accumulates an XML document in memory
#[derive(Debug, Default)]
pub(crate) struct XmlWriter {
    content: String,
    depth: usize,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a document with the XML declaration
    pub fn with_declaration() -> Self {
        let mut xml = Self::new();
        xml.content.push_str("<?xml version='1.0' encoding='utf-8'?>\n");
        xml
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.content.push_str("  ");
        }
    }

    fn start_tag(&mut self, tag: &str, attrs: &[(&str, String)]) {
        self.indent();
        self.content.push('<');
        self.content.push_str(tag);
        for (key, value) in attrs {
            self.content.push(' ');
            self.content.push_str(key);
            self.content.push_str("=\"");
            self.content.push_str(&escape(value));
            self.content.push('"');
        }
    }

    /// `<tag a="b">` followed by a newline; nested output is indented
    pub fn open(&mut self, tag: &str, attrs: &[(&str, String)]) {
        self.start_tag(tag, attrs);
        self.content.push_str(">\n");
        self.depth += 1;
    }

    /// `</tag>`
    pub fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.content.push_str("</");
        self.content.push_str(tag);
        self.content.push_str(">\n");
    }

    /// `<tag a="b"/>`
    pub fn empty(&mut self, tag: &str, attrs: &[(&str, String)]) {
        self.start_tag(tag, attrs);
        self.content.push_str("/>\n");
    }

    /// `<tag>text</tag>`
    pub fn text(&mut self, tag: &str, text: &str) {
        self.indent();
        self.content.push('<');
        self.content.push_str(tag);
        self.content.push('>');
        self.content.push_str(&escape(text));
        self.content.push_str("</");
        self.content.push_str(tag);
        self.content.push_str(">\n");
    }

    pub fn finish(self) -> String {
        self.content
    }
}

/// Escape the five XML special characters
pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Space-separated list, the engine's array encoding
pub(crate) fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nesting_and_escaping() {
        let mut xml = XmlWriter::with_declaration();
        xml.open("model", &[]);
        xml.empty("cell", &[("name", "fuel & <water>".to_string())]);
        xml.text("path", "a\"b");
        xml.close("model");
        let out = xml.finish();

        assert_eq!(
            out,
            "<?xml version='1.0' encoding='utf-8'?>\n\
             <model>\n  \
             <cell name=\"fuel &amp; &lt;water&gt;\"/>\n  \
             <path>a&quot;b</path>\n\
             </model>\n"
        );
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&[1.0, 2.5, 0.0]), "1 2.5 0");
        assert_eq!(join::<u32>(&[]), "");
    }
}
