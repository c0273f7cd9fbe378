use terracotta_storefront::routes::params::{Pagination, ProductQuery};

#[test]
fn pagination_defaults_and_clamps() {
    assert_eq!(Pagination::default().normalize(), (1, 20, 0));

    let page = Pagination {
        page: Some(0),
        per_page: Some(1000),
    };
    assert_eq!(page.normalize(), (1, 100, 0));

    let page = Pagination {
        page: Some(3),
        per_page: Some(25),
    };
    assert_eq!(page.normalize(), (3, 25, 50));
}

#[test]
fn far_pages_saturate_the_offset() {
    let page = Pagination {
        page: Some(i64::MAX),
        per_page: Some(100),
    };
    let (page_no, per_page, offset) = page.normalize();
    assert_eq!(page_no, i64::MAX);
    assert_eq!(per_page, 100);
    assert_eq!(offset, i64::MAX);

    let query = ProductQuery {
        page: Some(i64::MAX),
        per_page: Some(i64::MAX),
        ..Default::default()
    };
    assert_eq!(query.pagination().normalize().2, i64::MAX);
}
