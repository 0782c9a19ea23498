// Copyright @yucwang 2021

use super::constants::Vector3f;

/// Dense row-major RGB image with linear radiometric values.
#[derive(Debug, Clone)]
pub struct Bitmap {
    data: Vec<Vector3f>,
    width: usize,
    height: usize,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self { data: vec![Vector3f::new(0.0, 0.0, 0.0); width * height],
               width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[Vector3f] {
        &self.data
    }
}

impl std::ops::Index<(usize, usize)> for Bitmap {
    type Output = Vector3f;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.data[y * self.width + x]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        &mut self.data[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::{ Bitmap, Vector3f };

    #[test]
    fn test_bitmap_indexing() {
        let mut bitmap = Bitmap::new(4, 3);
        assert_eq!(bitmap.width(), 4);
        assert_eq!(bitmap.height(), 3);

        bitmap[(2, 1)] = Vector3f::new(1.0, 2.0, 3.0);
        assert_eq!(bitmap[(2, 1)], Vector3f::new(1.0, 2.0, 3.0));
        assert_eq!(bitmap[(1, 2)], Vector3f::new(0.0, 0.0, 0.0));

        // Row-major layout.
        assert_eq!(bitmap.data()[1 * 4 + 2], Vector3f::new(1.0, 2.0, 3.0));
    }
}
