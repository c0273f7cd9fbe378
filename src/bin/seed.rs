use terracotta_storefront::{
    config::AppConfig,
    db::create_pool,
    middleware::auth::{ROLE_ADMIN, ROLE_CUSTOMER},
    services::auth_service::hash_password,
};
use uuid::Uuid;

// (name, slug, description, sort order)
const CATEGORIES: [(&str, &str, &str, i32); 4] = [
    ("Planters", "planters", "Hand-thrown pots for gardens and balconies", 1),
    ("Home Decor", "decor", "Vases, wall hangings and tabletop pieces", 2),
    ("Kitchenware", "kitchen", "Clay cookware, water pots and serveware", 3),
    ("Diyas & Lamps", "lamps", "Oil diyas, lanterns and lamp shades", 4),
];

struct SeedProduct {
    name: &'static str,
    slug: &'static str,
    category: &'static str,
    price: i64,
    original_price: Option<i64>,
    size: &'static str,
    tag: Option<&'static str>,
    stock: i32,
}

const PRODUCTS: [SeedProduct; 10] = [
    SeedProduct {
        name: "Classic Round Planter",
        slug: "classic-round-planter",
        category: "planters",
        price: 499,
        original_price: Some(699),
        size: "medium",
        tag: Some("bestseller"),
        stock: 40,
    },
    SeedProduct {
        name: "Hanging Bell Planter",
        slug: "hanging-bell-planter",
        category: "planters",
        price: 349,
        original_price: None,
        size: "small",
        tag: Some("new"),
        stock: 25,
    },
    SeedProduct {
        name: "Tall Floor Planter",
        slug: "tall-floor-planter",
        category: "planters",
        price: 1299,
        original_price: Some(1599),
        size: "large",
        tag: None,
        stock: 3,
    },
    SeedProduct {
        name: "Warli Painted Vase",
        slug: "warli-painted-vase",
        category: "decor",
        price: 899,
        original_price: Some(1099),
        size: "medium",
        tag: Some("bestseller"),
        stock: 18,
    },
    SeedProduct {
        name: "Terracotta Wall Mask",
        slug: "terracotta-wall-mask",
        category: "decor",
        price: 749,
        original_price: None,
        size: "small",
        tag: Some("new"),
        stock: 0,
    },
    SeedProduct {
        name: "Clay Cooking Handi",
        slug: "clay-cooking-handi",
        category: "kitchen",
        price: 650,
        original_price: Some(800),
        size: "large",
        tag: None,
        stock: 30,
    },
    SeedProduct {
        name: "Water Matka with Tap",
        slug: "water-matka-with-tap",
        category: "kitchen",
        price: 1150,
        original_price: None,
        size: "large",
        tag: Some("bestseller"),
        stock: 12,
    },
    SeedProduct {
        name: "Hand Painted Diya Set of 12",
        slug: "hand-painted-diya-set-of-12",
        category: "lamps",
        price: 299,
        original_price: Some(399),
        size: "small",
        tag: Some("festive"),
        stock: 120,
    },
    SeedProduct {
        name: "Jaali Tea Light Lantern",
        slug: "jaali-tea-light-lantern",
        category: "lamps",
        price: 549,
        original_price: None,
        size: "medium",
        tag: Some("festive"),
        stock: 4,
    },
    SeedProduct {
        name: "Urli Floating Bowl",
        slug: "urli-floating-bowl",
        category: "decor",
        price: 999,
        original_price: Some(1299),
        size: "large",
        tag: Some("festive"),
        stock: 15,
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,terracotta_storefront=debug".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_profile(
        &pool,
        "admin@example.com",
        "admin123",
        "Store Admin",
        ROLE_ADMIN,
    )
    .await?;
    let customer_id = ensure_profile(
        &pool,
        "customer@example.com",
        "customer123",
        "Asha Customer",
        ROLE_CUSTOMER,
    )
    .await?;
    seed_categories(&pool).await?;
    seed_products(&pool).await?;

    tracing::info!(%admin_id, %customer_id, "seed completed");
    Ok(())
}

async fn ensure_profile(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    full_name: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO profiles (id, email, password_hash, full_name, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(role)
    .fetch_one(pool)
    .await?;

    tracing::info!(email, role, "ensured profile");
    Ok(id)
}

async fn seed_categories(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for (name, slug, description, sort_order) in CATEGORIES {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug, description, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(sort_order)
        .execute(pool)
        .await?;
    }

    tracing::info!(count = CATEGORIES.len(), "seeded categories");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for product in &PRODUCTS {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, category_id, name, slug, price, original_price, size, tag, stock)
            VALUES
                ($1, (SELECT id FROM categories WHERE slug = $2), $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(product.category)
        .bind(product.name)
        .bind(product.slug)
        .bind(product.price)
        .bind(product.original_price)
        .bind(product.size)
        .bind(product.tag)
        .bind(product.stock)
        .execute(pool)
        .await?;
    }

    tracing::info!(count = PRODUCTS.len(), "seeded products");
    Ok(())
}
