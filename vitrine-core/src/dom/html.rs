use super::{Document, NodeId};

const VOID_ELEMENTS: [&str; 6] = ["img", "br", "hr", "input", "meta", "link"];

impl Document {
    /// Serialize `node` and its subtree. Attribute order is stable: `id`,
    /// `class`, remaining attributes by name, then `style`.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Serialize only the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            self.write_html(*child, &mut out);
        }
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(el) = self.node(node) else {
            return;
        };

        out.push('<');
        out.push_str(&el.tag);
        if let Some(id) = el.attrs.get("id") {
            push_attr(out, "id", id);
        }
        if !el.classes.is_empty() {
            push_attr(out, "class", &el.classes.join(" "));
        }
        for (name, value) in el.attrs.iter().filter(|(name, _)| *name != "id") {
            push_attr(out, name, value);
        }
        if !el.style.is_empty() {
            let style = el
                .style
                .iter()
                .map(|(p, v)| format!("{p}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            push_attr(out, "style", &style);
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&el.tag.as_str()) {
            return;
        }

        if let Some(text) = el.text.as_deref() {
            out.push_str(&escape(text, false));
        }
        for child in &el.children {
            self.write_html(*child, out);
        }
        out.push_str("</");
        out.push_str(&el.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value, true));
    out.push('"');
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
