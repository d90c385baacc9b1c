//! 固定的用户与商品目录，以及请求体的生成

use rand::Rng;

use crate::model::{Dimensions, ProductRequest, RegisterRequest, Role, UserTemplate};

/// 数据生成器的两种形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// 直接注册 10 个用户、10 个商品
    Simple,
    /// 先登录再注册，处理限流，25 个分类商品
    Working,
}

/// 商品目录条目
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductTemplate {
    pub name: &'static str,
    pub price: f64,
    /// 固定库存；为空时随机生成
    pub quantity: Option<u32>,
    pub category: Option<&'static str>,
}

const fn user(
    first_name: &'static str,
    last_name: &'static str,
    email: Option<&'static str>,
    role: Role,
    department: &'static str,
) -> UserTemplate {
    UserTemplate {
        first_name,
        last_name,
        email,
        role,
        department,
    }
}

const fn stocked(name: &'static str, price: f64, quantity: u32) -> ProductTemplate {
    ProductTemplate {
        name,
        price,
        quantity: Some(quantity),
        category: None,
    }
}

const fn categorized(name: &'static str, category: &'static str, price: f64) -> ProductTemplate {
    ProductTemplate {
        name,
        price,
        quantity: None,
        category: Some(category),
    }
}

pub static SIMPLE_USERS: [UserTemplate; 10] = [
    user("Admin", "User", Some("admin@rapidsort.com"), Role::Admin, "management"),
    user("John", "Manager", Some("john.manager@rapidsort.com"), Role::Manager, "inventory"),
    user("Sarah", "Sales", Some("sarah.sales@rapidsort.com"), Role::Manager, "sales"),
    user("Mike", "Stock", Some("mike.stock@rapidsort.com"), Role::Employee, "inventory"),
    user("Lisa", "Warehouse", Some("lisa.warehouse@rapidsort.com"), Role::Employee, "warehouse"),
    user("David", "Purchase", Some("david.purchase@rapidsort.com"), Role::Employee, "purchasing"),
    user("Emma", "Logistics", Some("emma.logistics@rapidsort.com"), Role::Manager, "warehouse"),
    user("Tom", "Sales", Some("tom.sales@rapidsort.com"), Role::Employee, "sales"),
    user("Anna", "Inventory", Some("anna.inventory@rapidsort.com"), Role::Employee, "inventory"),
    user("Robert", "Buyer", Some("robert.buyer@rapidsort.com"), Role::Manager, "purchasing"),
];

pub static WORKING_USERS: [UserTemplate; 5] = [
    user("Admin", "User", None, Role::Admin, "management"),
    user("John", "Manager", None, Role::Manager, "inventory"),
    user("Sarah", "Sales", None, Role::Manager, "sales"),
    user("Mike", "Stock", None, Role::Employee, "inventory"),
    user("Lisa", "Warehouse", None, Role::Employee, "warehouse"),
];

pub static SIMPLE_PRODUCTS: [ProductTemplate; 10] = [
    stocked("Wireless Headphones", 99.99, 50),
    stocked("Smartphone Case", 19.99, 200),
    stocked("Laptop Stand", 49.99, 30),
    stocked("USB-C Cable", 12.99, 100),
    stocked("Cotton T-Shirt", 24.99, 150),
    stocked("Running Shoes", 89.99, 75),
    stocked("Coffee Maker", 129.99, 25),
    stocked("Desk Lamp", 39.99, 40),
    stocked("Notebook Set", 15.99, 80),
    stocked("Water Bottle", 22.99, 120),
];

pub static WORKING_PRODUCTS: [ProductTemplate; 25] = [
    // Electronics
    categorized("Wireless Bluetooth Headphones", "Electronics", 79.99),
    categorized("Smartphone Protective Case", "Electronics", 24.99),
    categorized("Adjustable Laptop Stand", "Electronics", 45.99),
    categorized("USB-C Charging Cable", "Electronics", 12.99),
    categorized("Portable Power Bank", "Electronics", 34.99),
    // Clothing
    categorized("Premium Cotton T-Shirt", "Clothing", 19.99),
    categorized("Classic Denim Jeans", "Clothing", 59.99),
    categorized("Athletic Running Shoes", "Clothing", 89.99),
    categorized("Winter Insulated Jacket", "Clothing", 129.99),
    categorized("Casual Baseball Cap", "Clothing", 16.99),
    // Home & Kitchen
    categorized("Stainless Steel Coffee Maker", "Home", 89.99),
    categorized("LED Desk Lamp", "Home", 39.99),
    categorized("Kitchen Knife Set", "Home", 67.99),
    categorized("Non-Stick Cookware Set", "Home", 149.99),
    categorized("Ceramic Dinnerware Set", "Home", 79.99),
    // Office Supplies
    categorized("Professional Notebook Set", "Office", 14.99),
    categorized("Premium Pen Collection", "Office", 29.99),
    categorized("Desktop Organizer", "Office", 22.99),
    categorized("Ergonomic Mouse Pad", "Office", 18.99),
    categorized("Wireless Computer Mouse", "Office", 35.99),
    // Sports & Outdoors
    categorized("Professional Basketball", "Sports", 28.99),
    categorized("Yoga Exercise Mat", "Sports", 32.99),
    categorized("Camping Tent (4-Person)", "Sports", 159.99),
    categorized("Fishing Rod Kit", "Sports", 74.99),
    categorized("Hiking Backpack", "Sports", 89.99),
];

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn random_sku<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("SKU-{}", rng.random_range(10000..=99999))
}

impl Variant {
    pub fn user_templates(&self) -> &'static [UserTemplate] {
        match self {
            Variant::Simple => &SIMPLE_USERS,
            Variant::Working => &WORKING_USERS,
        }
    }

    pub fn product_catalog(&self) -> &'static [ProductTemplate] {
        match self {
            Variant::Simple => &SIMPLE_PRODUCTS,
            Variant::Working => &WORKING_PRODUCTS,
        }
    }

    /// 生成注册请求，电话号码随机
    pub fn register_request<R: Rng + ?Sized>(
        &self,
        template: &UserTemplate,
        password: &str,
        rng: &mut R,
    ) -> RegisterRequest {
        let phone = match self {
            Variant::Simple => format!("+1-555-{}", rng.random_range(1000..=9999)),
            Variant::Working => format!("+1{}", rng.random_range(1_000_000_000u64..=9_999_999_999)),
        };

        RegisterRequest {
            first_name: template.first_name.to_string(),
            last_name: template.last_name.to_string(),
            email: template.email(),
            password: password.to_string(),
            role: template.role,
            department: template.department.to_string(),
            phone,
        }
    }

    /// 生成完整的商品请求，次要字段随机
    pub fn product_request<R: Rng + ?Sized>(
        &self,
        template: &ProductTemplate,
        rng: &mut R,
    ) -> ProductRequest {
        let lower_name = template.name.to_lowercase();

        match self {
            Variant::Simple => ProductRequest {
                name: template.name.to_string(),
                description: format!("High-quality {} for everyday use", lower_name),
                price: template.price,
                quantity: template.quantity.unwrap_or(0),
                sku: random_sku(rng),
                min_stock_level: 10,
                max_stock_level: 500,
                weight: None,
                dimensions: None,
                barcode: None,
                category: template.category.map(str::to_string),
                status: "active".to_string(),
            },
            Variant::Working => ProductRequest {
                name: template.name.to_string(),
                description: format!(
                    "High-quality {} perfect for daily use. Excellent build quality and great value.",
                    lower_name
                ),
                price: template.price,
                quantity: template
                    .quantity
                    .unwrap_or_else(|| rng.random_range(25..=200)),
                sku: random_sku(rng),
                min_stock_level: rng.random_range(5..=15),
                max_stock_level: rng.random_range(100..=300),
                weight: Some(round_to(rng.random_range(0.1..5.0), 2)),
                dimensions: Some(Dimensions {
                    length: round_to(rng.random_range(5.0..40.0), 1),
                    width: round_to(rng.random_range(5.0..30.0), 1),
                    height: round_to(rng.random_range(2.0..20.0), 1),
                }),
                barcode: Some(
                    rng.random_range(1_000_000_000_000u64..=9_999_999_999_999)
                        .to_string(),
                ),
                category: template.category.map(str::to_string),
                status: "active".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(Variant::Simple.user_templates().len(), 10);
        assert_eq!(Variant::Working.user_templates().len(), 5);
        assert_eq!(Variant::Simple.product_catalog().len(), 10);
        assert_eq!(Variant::Working.product_catalog().len(), 25);
    }

    #[test]
    fn test_emails_are_unique_and_admin_first() {
        for variant in [Variant::Simple, Variant::Working] {
            let templates = variant.user_templates();
            let emails: HashSet<_> = templates.iter().map(|t| t.email()).collect();
            assert_eq!(emails.len(), templates.len());
            assert_eq!(templates[0].role, Role::Admin);
        }
        assert_eq!(SIMPLE_USERS[0].email(), "admin@rapidsort.com");
        assert_eq!(WORKING_USERS[0].email(), "admin.user@rapidsort.com");
        assert_eq!(WORKING_USERS[4].email(), "lisa.warehouse@rapidsort.com");
    }

    #[test]
    fn test_phone_formats() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let simple = Variant::Simple.register_request(&SIMPLE_USERS[1], "pw", &mut rng);
            let digits = simple.phone.strip_prefix("+1-555-").unwrap();
            assert_eq!(digits.len(), 4);
            assert!(digits.parse::<u32>().unwrap() >= 1000);

            let working = Variant::Working.register_request(&WORKING_USERS[1], "pw", &mut rng);
            let digits = working.phone.strip_prefix("+1").unwrap();
            assert_eq!(digits.len(), 10);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(working.password, "pw");
        }
    }

    #[test]
    fn test_simple_product_payload() {
        let mut rng = StdRng::seed_from_u64(1);
        let product = Variant::Simple.product_request(&SIMPLE_PRODUCTS[3], &mut rng);

        assert_eq!(product.name, "USB-C Cable");
        assert_eq!(product.description, "High-quality usb-c cable for everyday use");
        assert_eq!(product.quantity, 100);
        assert_eq!((product.min_stock_level, product.max_stock_level), (10, 500));
        assert!(product.weight.is_none() && product.dimensions.is_none());
        assert_eq!(product.status, "active");

        let sku: u32 = product.sku.strip_prefix("SKU-").unwrap().parse().unwrap();
        assert!((10000..=99999).contains(&sku));
    }

    #[test]
    fn test_working_product_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for template in WORKING_PRODUCTS.iter() {
            let product = Variant::Working.product_request(template, &mut rng);

            assert!(product.description.starts_with("High-quality "));
            assert!(product.description.contains(&template.name.to_lowercase()));
            assert!((25..=200).contains(&product.quantity));
            assert!((5..=15).contains(&product.min_stock_level));
            assert!((100..=300).contains(&product.max_stock_level));
            assert_eq!(product.category.as_deref(), template.category);

            let weight = product.weight.unwrap();
            assert!((0.1..=5.0).contains(&weight));
            assert_eq!(round_to(weight, 2), weight);

            let dims = product.dimensions.unwrap();
            assert!((5.0..=40.0).contains(&dims.length));
            assert!((5.0..=30.0).contains(&dims.width));
            assert!((2.0..=20.0).contains(&dims.height));

            let barcode = product.barcode.unwrap();
            assert_eq!(barcode.len(), 13);
        }
    }
}
