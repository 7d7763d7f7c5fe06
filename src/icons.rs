pub trait IconRenderer<E> {
    fn render_all(&self);
    fn render_within(&self, node: &E);
}
