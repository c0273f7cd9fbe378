/// What a category page lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelector {
    /// Products in the category with this slug.
    Category(&'static str),
    /// Products carrying this tag.
    Tag(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPage {
    pub slug: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub selector: PageSelector,
}

pub const CATEGORY_PAGES: &[CategoryPage] = &[
    CategoryPage {
        slug: "garden-planters",
        title: "Garden Planters",
        subtitle: "Hand-thrown pots for balconies, patios and gardens",
        selector: PageSelector::Category("planters"),
    },
    CategoryPage {
        slug: "home-decor",
        title: "Home Decor",
        subtitle: "Vases, wall hangings and tabletop pieces",
        selector: PageSelector::Category("decor"),
    },
    CategoryPage {
        slug: "kitchenware",
        title: "Kitchenware",
        subtitle: "Clay cookware, water pots and serveware",
        selector: PageSelector::Category("kitchen"),
    },
    CategoryPage {
        slug: "diyas-and-lamps",
        title: "Diyas & Lamps",
        subtitle: "Oil lamps and lanterns fired in our kilns",
        selector: PageSelector::Category("lamps"),
    },
    CategoryPage {
        slug: "festive-collection",
        title: "Festive Collection",
        subtitle: "Pieces made for the festival season",
        selector: PageSelector::Tag("festive"),
    },
    CategoryPage {
        slug: "best-sellers",
        title: "Best Sellers",
        subtitle: "What our customers keep coming back for",
        selector: PageSelector::Tag("bestseller"),
    },
    CategoryPage {
        slug: "new-arrivals",
        title: "New Arrivals",
        subtitle: "Fresh out of the kiln",
        selector: PageSelector::Tag("new"),
    },
];

pub fn find_page(slug: &str) -> Option<&'static CategoryPage> {
    CATEGORY_PAGES.iter().find(|page| page.slug == slug)
}
