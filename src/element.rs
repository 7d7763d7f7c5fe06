/// The slice of the DOM the interaction components need.
pub trait PageElement: Clone {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_style(&self, property: &str, value: &str);
    fn set_text(&self, text: &str);
    fn query_all(&self, selector: &str) -> Vec<Self>;
    fn remove(&self);

    fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_VISIBLE: &str = "visible";
