use serde::Serialize;

/// Index into a site's image list with wrap-around navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageCarousel {
    len: usize,
    index: usize,
}

impl ImageCarousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Navigation controls only make sense with more than one image.
    pub fn has_multiple(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn previous(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jump to a thumbnail; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    pub fn current<'a>(&self, images: &'a [String]) -> Option<&'a str> {
        images.get(self.index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_both_directions() {
        let mut carousel = ImageCarousel::new(3);
        carousel.previous();
        assert_eq!(carousel.index(), 2);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        carousel.next();
        carousel.next();
        carousel.next();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut carousel = ImageCarousel::new(0);
        carousel.next();
        carousel.previous();
        carousel.select(4);
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.current(&[]), None);
    }

    #[test]
    fn select_ignores_out_of_range() {
        let images = vec!["/a.jpg".to_string(), "/b.jpg".to_string()];
        let mut carousel = ImageCarousel::new(images.len());
        carousel.select(1);
        assert_eq!(carousel.current(&images), Some("/b.jpg"));
        carousel.select(7);
        assert_eq!(carousel.index(), 1);
    }
}
