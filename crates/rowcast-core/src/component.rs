//! The renderable capability consumed by profiles.

/// Something that produces one piece of a slot's line.
///
/// Components are evaluated in list order every time their profile renders.
/// Returning `None` leaves no trace in the frame's output.
pub trait Component: Send {
    fn render(&self) -> Option<String>;
}

impl<F> Component for F
where
    F: Fn() -> Option<String> + Send,
{
    fn render(&self) -> Option<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_components() {
        let hello = || Some("hello".to_string());
        let nothing = || -> Option<String> { None };

        assert_eq!(hello.render().as_deref(), Some("hello"));
        assert_eq!(nothing.render(), None);
    }

    #[test]
    fn boxed_component_renders_through_deref() {
        let boxed: Box<dyn Component> = Box::new(|| Some("boxed".to_string()));
        assert_eq!(boxed.render().as_deref(), Some("boxed"));
    }
}
