use chrono::{Duration, Utc};
use terracotta_storefront::{
    catalog::{
        CATEGORY_PAGES, CardSort, PageSelector, ProductCard, ProductFilter, find_page,
        view::discount_percent,
    },
    models::Product,
    slug::{is_valid_slug, resolve_slug, slugify},
};
use uuid::Uuid;

fn product(name: &str, price: i64, size: &str, stock: i32, age_days: i64) -> Product {
    let created_at = Utc::now() - Duration::days(age_days);
    Product {
        id: Uuid::new_v4(),
        category_id: None,
        name: name.into(),
        slug: slugify(name),
        description: None,
        price,
        original_price: None,
        image: None,
        size: Some(size.into()),
        tag: None,
        stock,
        is_active: true,
        created_at,
        updated_at: created_at,
    }
}

fn cards() -> Vec<ProductCard> {
    vec![
        product("Classic Round Planter", 499, "medium", 40, 5),
        product("Hanging Bell Planter", 349, "small", 0, 1),
        product("Tall Floor Planter", 1299, "large", 3, 30),
        product("Mini Succulent Pot", 199, "Small", 12, 2),
    ]
    .into_iter()
    .map(|p| ProductCard::from_product(p, Some("planters".into()), 10))
    .collect()
}

#[test]
fn empty_filter_keeps_everything_in_order() {
    let all = cards();
    let kept = ProductFilter::default().apply(all.clone());
    assert_eq!(kept, all);
}

#[test]
fn filter_returns_exactly_the_matching_subset() {
    let all = cards();
    let filter = ProductFilter {
        min_price: Some(200),
        max_price: Some(1000),
        ..Default::default()
    };
    let kept = filter.apply(all.clone());

    let expected: Vec<_> = all.iter().filter(|c| filter.matches(c)).cloned().collect();
    assert_eq!(kept, expected);
    assert!(kept.iter().all(|c| (200..=1000).contains(&c.price)));
    let names: Vec<_> = kept.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Classic Round Planter", "Hanging Bell Planter"]);
}

#[test]
fn size_filter_is_case_insensitive() {
    let filter = ProductFilter::default().with_sizes("SMALL, large");
    let kept = filter.apply(cards());
    let names: Vec<_> = kept.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        ["Hanging Bell Planter", "Tall Floor Planter", "Mini Succulent Pot"]
    );
}

#[test]
fn in_stock_only_drops_sold_out_cards() {
    let filter = ProductFilter {
        in_stock_only: true,
        ..Default::default()
    };
    let kept = filter.apply(cards());
    assert_eq!(kept.len(), 3);
    assert!(kept.iter().all(|c| c.in_stock));
}

#[test]
fn sorts_reorder_cards() {
    let mut by_price = cards();
    CardSort::PriceAsc.apply(&mut by_price);
    let prices: Vec<_> = by_price.iter().map(|c| c.price).collect();
    assert_eq!(prices, [199, 349, 499, 1299]);

    CardSort::PriceDesc.apply(&mut by_price);
    assert_eq!(by_price[0].price, 1299);

    let mut newest = cards();
    CardSort::Newest.apply(&mut newest);
    assert_eq!(newest[0].name, "Hanging Bell Planter");

    let mut by_name = cards();
    CardSort::Name.apply(&mut by_name);
    assert_eq!(by_name[0].name, "Classic Round Planter");

    let fetched = cards();
    let mut featured = fetched.clone();
    CardSort::Featured.apply(&mut featured);
    assert_eq!(featured, fetched);
}

#[test]
fn card_caps_quantity_by_stock_and_line_limit() {
    let all = cards();
    assert_eq!(all[0].max_quantity, 10);
    assert_eq!(all[1].max_quantity, 0);
    assert!(!all[1].in_stock);
    assert_eq!(all[2].max_quantity, 3);

    let line = all[2].to_cart_item(2);
    assert_eq!(line.id, all[2].id);
    assert_eq!(line.quantity, 2);
    assert_eq!(line.max_quantity, 3);
}

#[test]
fn discount_is_whole_percent_of_original() {
    assert_eq!(discount_percent(500, Some(700)), Some(28));
    assert_eq!(discount_percent(500, Some(500)), None);
    assert_eq!(discount_percent(500, None), None);
}

#[test]
fn every_page_slug_is_unique_and_valid() {
    for page in CATEGORY_PAGES {
        assert!(is_valid_slug(page.slug), "{}", page.slug);
        assert_eq!(
            CATEGORY_PAGES.iter().filter(|p| p.slug == page.slug).count(),
            1
        );
    }
}

#[test]
fn pages_resolve_to_categories_or_tags() {
    let planters = find_page("garden-planters").expect("planters page");
    assert_eq!(planters.selector, PageSelector::Category("planters"));

    let festive = find_page("festive-collection").expect("festive page");
    assert_eq!(festive.selector, PageSelector::Tag("festive"));

    assert!(find_page("does-not-exist").is_none());
}

#[test]
fn slugs_are_derived_from_names() {
    assert_eq!(slugify("Clay Diya (Set of 4)"), "clay-diya-set-of-4");
    assert_eq!(slugify("  Urli -- Bowl  "), "urli-bowl");
    assert_eq!(
        resolve_slug(None, "Water Matka").as_deref(),
        Some("water-matka")
    );
    assert_eq!(resolve_slug(Some("Bad Slug"), "x"), None);
    assert_eq!(resolve_slug(Some(" kulhad "), "x").as_deref(), Some("kulhad"));
}
