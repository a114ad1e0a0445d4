use crate::utils::storage as storage_utils;

pub const MOBILE_PAGE_SIZE: usize = 5;
pub const DESKTOP_PAGE_SIZE: usize = 10;
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

pub fn page_size_for(is_mobile: bool) -> usize {
    if is_mobile {
        MOBILE_PAGE_SIZE
    } else {
        DESKTOP_PAGE_SIZE
    }
}

pub fn is_mobile_viewport() -> bool {
    storage_utils::window()
        .ok()
        .and_then(|w| {
            w.match_media(&format!("(max-width: {}px)", MOBILE_BREAKPOINT_PX))
                .ok()
                .flatten()
        })
        .map(|query| query.matches())
        .unwrap_or(false)
}

pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, item_count: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(item_count, page_size))
}

/// Items on 1-based `page`; empty when the page is past the end.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// 1-based `(first, last)` item numbers shown on `page`, or `(0, 0)` when empty.
pub fn page_bounds(page: usize, page_size: usize, item_count: usize) -> (usize, usize) {
    if item_count == 0 {
        return (0, 0);
    }
    let page = clamp_page(page, item_count, page_size);
    let page_size = page_size.max(1);
    let first = (page - 1) * page_size + 1;
    let last = (page * page_size).min(item_count);
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenated_pages_rebuild_the_list() {
        for (len, size) in [(0usize, 5usize), (1, 5), (5, 5), (12, 5), (23, 10), (30, 10)] {
            let items: Vec<usize> = (0..len).collect();
            let pages = total_pages(len, size);
            assert_eq!(pages, len.div_ceil(size).max(1));
            let rebuilt: Vec<usize> = (1..=pages)
                .flat_map(|page| paginate(&items, page, size).to_vec())
                .collect();
            assert_eq!(rebuilt, items);
            for page in 1..=pages {
                assert!(paginate(&items, page, size).len() <= size);
            }
        }
    }

    #[test]
    fn out_of_range_pages_are_empty_or_clamped() {
        let items: Vec<u8> = (0..12).collect();
        assert!(paginate(&items, 4, 5).is_empty());
        assert_eq!(paginate(&items, 0, 5), &items[0..5]);
        assert_eq!(clamp_page(9, 12, 5), 3);
        assert_eq!(clamp_page(0, 12, 5), 1);
        assert_eq!(clamp_page(3, 0, 5), 1);
    }

    #[test]
    fn page_size_follows_viewport() {
        assert_eq!(page_size_for(true), 5);
        assert_eq!(page_size_for(false), 10);
    }

    #[test]
    fn bounds_describe_visible_range() {
        assert_eq!(page_bounds(1, 10, 0), (0, 0));
        assert_eq!(page_bounds(1, 10, 23), (1, 10));
        assert_eq!(page_bounds(3, 10, 23), (21, 23));
        assert_eq!(page_bounds(7, 10, 23), (21, 23));
    }
}
