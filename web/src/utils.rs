use chromarow_core::Point;
use web_sys::Element;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn location_hash() -> String {
    gloo::utils::window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string())
}

/// Viewport position of the element's top-left corner.
pub(crate) fn element_origin(element: &Element) -> Point {
    let rect = element.get_bounding_client_rect();
    Point::new(rect.left(), rect.top())
}
