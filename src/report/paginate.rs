use crate::model::report::StaffMonthGroup;

/// Chunk the sorted staff blocks into print pages. The last page may be
/// short; order is preserved.
pub fn paginate(groups: Vec<StaffMonthGroup>, page_size: usize) -> Vec<Vec<StaffMonthGroup>> {
    let page_size = page_size.max(1);
    let mut pages = Vec::with_capacity(groups.len().div_ceil(page_size));
    let mut iter = groups.into_iter().peekable();
    while iter.peek().is_some() {
        pages.push(iter.by_ref().take(page_size).collect());
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(email: &str) -> StaffMonthGroup {
        StaffMonthGroup {
            staff_email: email.into(),
            staff_name: email.into(),
            rows: Vec::new(),
            late_total_minutes: 0,
            absent_days: 0,
        }
    }

    #[test]
    fn seven_blocks_make_pages_of_three_three_one() {
        let groups: Vec<_> = (0..7).map(|i| block(&format!("s{i}@company.my"))).collect();
        let pages = paginate(groups, 3);
        let sizes: Vec<usize> = pages.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(pages[2][0].staff_email, "s6@company.my");
    }

    #[test]
    fn empty_input_yields_no_pages() {
        assert!(paginate(Vec::new(), 3).is_empty());
    }

    #[test]
    fn exact_multiple_has_no_short_page() {
        let groups: Vec<_> = (0..6).map(|i| block(&format!("s{i}@company.my"))).collect();
        let sizes: Vec<usize> = paginate(groups, 3).iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 3]);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let groups = vec![block("a@company.my")];
        assert_eq!(paginate(groups, 0).len(), 1);
    }
}
