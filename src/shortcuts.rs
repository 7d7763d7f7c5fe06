pub const THEME_SHORTCUT_KEY: &str = "t";

#[derive(Clone, Debug, Default)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    /// Tag name of the element holding focus, if any.
    pub focus_tag: Option<String>,
}

fn is_text_entry(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea")
}

pub fn is_theme_shortcut(press: &KeyPress) -> bool {
    if press.key != THEME_SHORTCUT_KEY || press.ctrl || press.meta || press.alt {
        return false;
    }

    !press.focus_tag.as_deref().is_some_and(is_text_entry)
}
