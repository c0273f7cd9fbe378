use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    catalog::{CardSort, ProductCard},
    dto::{
        analytics::{AnalyticsSummary, StatusCount, TopProduct},
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        bulk::{
            BulkData, BulkFailure, BulkResult, OrderBulkOperation, OrderBulkRequest,
            ProductBulkOperation, ProductBulkRequest,
        },
        cart::{AddToCartRequest, CartMutation, CartView, UpdateCartItemRequest},
        catalog::{CollectionInfo, CollectionList, CollectionPage},
        categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
        orders::{CheckoutRequest, OrderList, OrderWithItems, PayOrderRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        wishlist::{AddToWishlistRequest, MoveToCartResponse, WishlistMutation, WishlistView},
    },
    models::{Category, Order, OrderItem, Product, Profile},
    response::{ApiResponse, Meta},
    routes::{
        admin, auth, cart, categories, collections, health, orders, params,
        products as product_routes, wishlist,
    },
    store::{CartItem, Toast, ToastLevel, WishlistItem},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::me,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        product_routes::list_products,
        product_routes::get_product,
        product_routes::get_product_by_slug,
        product_routes::create_product,
        product_routes::update_product,
        product_routes::delete_product,
        collections::list_collections,
        collections::collection_page,
        cart::view_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        cart::clear_cart,
        wishlist::view_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist,
        wishlist::move_to_cart,
        orders::list_orders,
        orders::checkout,
        orders::get_order,
        orders::pay_order,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::bulk_orders,
        admin::bulk_products,
        admin::list_low_stock,
        admin::adjust_inventory,
        admin::analytics
    ),
    components(
        schemas(
            Profile,
            Category,
            Product,
            ProductCard,
            Order,
            OrderItem,
            CartItem,
            WishlistItem,
            Toast,
            ToastLevel,
            CardSort,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CategoryList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CollectionInfo,
            CollectionList,
            CollectionPage,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartView,
            CartMutation,
            AddToWishlistRequest,
            WishlistView,
            WishlistMutation,
            MoveToCartResponse,
            CheckoutRequest,
            PayOrderRequest,
            OrderList,
            OrderWithItems,
            admin::UpdateOrderStatusRequest,
            admin::InventoryAdjustRequest,
            ProductBulkOperation,
            OrderBulkOperation,
            BulkData,
            ProductBulkRequest,
            OrderBulkRequest,
            BulkFailure,
            BulkResult,
            AnalyticsSummary,
            StatusCount,
            TopProduct,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            params::LowStockQuery,
            params::CollectionQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<BulkResult>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Collections", description = "Category listing pages"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Wishlist", description = "Wishlist endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
