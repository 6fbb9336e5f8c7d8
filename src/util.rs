use crate::consts;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Extra navigation methods for the fieldless enums used as menus
pub(crate) trait EnumExt: Enum + Sized {
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH.saturating_sub(1))
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize().checked_add(1)?;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`, shrunk as needed
/// to fit
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
    enum Abc {
        A,
        B,
        C,
    }

    #[test]
    fn enum_navigation() {
        assert_eq!(Abc::iter().collect::<Vec<_>>(), [Abc::A, Abc::B, Abc::C]);
        assert_eq!(Abc::min(), Abc::A);
        assert_eq!(Abc::max(), Abc::C);
        assert_eq!(Abc::A.next(), Some(Abc::B));
        assert_eq!(Abc::C.next(), None);
        assert_eq!(Abc::B.prev(), Some(Abc::A));
        assert_eq!(Abc::A.prev(), None);
    }

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Size::new(80, 24), Rect::new(0, 0, 80, 24))]
    #[case(Rect::new(0, 0, 100, 30), Size::new(80, 24), Rect::new(10, 3, 80, 24))]
    #[case(Rect::new(0, 1, 80, 22), Size::new(22, 22), Rect::new(29, 1, 22, 22))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] expected: Rect) {
        assert_eq!(center_rect(area, size), expected);
    }
}
