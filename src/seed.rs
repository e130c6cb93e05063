//! Launch catalog seeding.
//!
//! `teashop seed` upserts the eight launch products keyed by slug, so
//! re-running refreshes prices and descriptions without duplicating rows.
//! Images are emoji placeholders until real photography lands.

use chrono::Utc;
use rusqlite::Connection;

use crate::db::queries;
use crate::error::Result;
use crate::id::gen_id;
use crate::models::{Product, ProductCategory, TeaType};

struct SeedProduct {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    long_description: &'static str,
    price: i64,
    original_price: Option<i64>,
    weight: &'static str,
    image: &'static str,
    images: &'static [&'static str],
    category: ProductCategory,
    tea_type: Option<TeaType>,
    origin: Option<&'static str>,
    harvest: Option<&'static str>,
    taste: Option<&'static str>,
    tags: &'static [&'static str],
    featured: bool,
    rating: f64,
    reviews_count: i64,
}

const LAUNCH_CATALOG: &[SeedProduct] = &[
    SeedProduct {
        slug: "shan-tuyet-co-thu",
        name: "Shan Tuyết Cổ Thụ",
        description: "Hương thơm cốm non, vị ngọt hậu sâu lắng từ Suối Giàng.",
        long_description: "Trà Shan Tuyết Cổ Thụ được thu hái từ những cây chè hàng trăm năm tuổi trên đỉnh Suối Giàng, Yên Bái. Búp chè to, phủ lớp lông tuyết trắng mịn, khi pha cho nước màu vàng mật ong, hương thơm cốm non nồng nàn và vị ngọt hậu sâu lắng.",
        price: 450_000,
        original_price: None,
        weight: "100g",
        image: "🌿",
        images: &["🌿", "🍵", "🍃", "🏔️"],
        category: ProductCategory::Tea,
        tea_type: Some(TeaType::Green),
        origin: Some("Suối Giàng, Yên Bái"),
        harvest: Some("Vụ Xuân 2024"),
        taste: Some("Chát dịu, ngọt hậu, hương cốm"),
        tags: &["Best Seller", "Organic"],
        featured: true,
        rating: 4.8,
        reviews_count: 124,
    },
    SeedProduct {
        slug: "bach-tra-tien",
        name: "Bạch Trà Tiên",
        description: "Những búp trà phủ lông tuyết trắng, hương hoa cỏ tinh tế.",
        long_description: "Bạch Trà Tiên là loại trà quý hiếm, chỉ hái một tôm (búp non nhất). Quá trình chế biến tối giản giúp giữ nguyên vẹn hương vị tự nhiên của đất trời. Trà có màu nước trắng ngà, hương thơm hoa cỏ tinh tế, vị thanh mát.",
        price: 850_000,
        original_price: None,
        weight: "100g",
        image: "🍵",
        images: &["🍵", "❄️", "🌱"],
        category: ProductCategory::Tea,
        tea_type: Some(TeaType::White),
        origin: Some("Tây Côn Lĩnh, Hà Giang"),
        harvest: Some("Vụ Xuân 2024"),
        taste: Some("Thanh mát, hương hoa, ngọt nhẹ"),
        tags: &["Premium", "Limited"],
        featured: true,
        rating: 4.9,
        reviews_count: 89,
    },
    SeedProduct {
        slug: "hong-tra-co-thu",
        name: "Hồng Trà Cổ Thụ",
        description: "Lên men tự nhiên, hương mật ong và trái cây chín.",
        long_description: "Hồng Trà Cổ Thụ 84tea được lên men 100% từ lá chè Shan Tuyết cổ thụ. Nước trà màu đỏ hổ phách đẹp mắt, hương thơm nồng nàn của mật ong rừng và trái cây chín. Vị trà đậm đà, không chát, để lại dư vị ngọt ngào khó quên.",
        price: 380_000,
        original_price: None,
        weight: "100g",
        image: "🍂",
        images: &["🍂", "🍯", "🥃"],
        category: ProductCategory::Tea,
        tea_type: Some(TeaType::Black),
        origin: Some("Mộc Châu, Sơn La"),
        harvest: Some("Vụ Hè 2024"),
        taste: Some("Đậm đà, hương mật ong, trái cây"),
        tags: &["New", "Warm"],
        featured: true,
        rating: 4.7,
        reviews_count: 56,
    },
    SeedProduct {
        slug: "hoang-tra-di-san",
        name: "Hoàng Trà Di Sản",
        description: "Công thức chế biến gia truyền, vị êm dịu độc đáo.",
        long_description: "Hoàng Trà (Trà Vàng) là dòng trà quý tộc, được chế biến qua quy trình ủ vàng đặc biệt. Trà có hương thơm thảo mộc nhẹ nhàng, nước vàng óng ả, vị êm dịu, không gắt, rất tốt cho tiêu hóa.",
        price: 550_000,
        original_price: None,
        weight: "100g",
        image: "✨",
        images: &["✨", "👑", "🌼"],
        category: ProductCategory::Tea,
        tea_type: Some(TeaType::Herbal),
        origin: Some("Thái Nguyên"),
        harvest: Some("Vụ Thu 2023"),
        taste: Some("Êm dịu, thảo mộc, thanh khiết"),
        tags: &["Limited", "Heritage"],
        featured: true,
        rating: 4.6,
        reviews_count: 42,
    },
    SeedProduct {
        slug: "o-long-cao-son",
        name: "Ô Long Cao Sơn",
        description: "Viên tròn đều, hương sữa và hoa lan quyến rũ.",
        long_description: "Ô Long Cao Sơn được trồng ở độ cao trên 1000m. Lá trà được vo thành viên tròn, khi pha nở ra nguyên búp. Hương thơm đặc trưng của sữa và hoa lan, vị ngọt thanh, chát nhẹ, nước xanh vàng trong vắt.",
        price: 650_000,
        original_price: None,
        weight: "100g",
        image: "🏞️",
        images: &["🏞️", "🌫️", "🍃"],
        category: ProductCategory::Tea,
        tea_type: Some(TeaType::Oolong),
        origin: Some("Lâm Đồng"),
        harvest: Some("Vụ Đông 2023"),
        taste: Some("Hương sữa, hoa lan, ngọt thanh"),
        tags: &["Popular"],
        featured: false,
        rating: 4.7,
        reviews_count: 98,
    },
    SeedProduct {
        slug: "bo-am-chen-tu-sa",
        name: "Bộ Ấm Chén Tử Sa",
        description: "Chế tác thủ công từ đất tử sa Nghi Hưng cao cấp.",
        long_description: "Bộ ấm chén Tử Sa được các nghệ nhân chế tác thủ công tỉ mỉ. Chất đất tử sa giữ nhiệt tốt, càng dùng càng bóng đẹp, giúp tôn vinh hương vị trà ngon nhất. Bộ sản phẩm gồm 1 ấm, 6 chén và 1 tống chuyên trà.",
        price: 2_500_000,
        original_price: Some(3_000_000),
        weight: "1 bộ",
        image: "🏺",
        images: &["🏺", "🫖", "🎁"],
        category: ProductCategory::Teaware,
        tea_type: None,
        origin: Some("Nghi Hưng"),
        harvest: None,
        taste: None,
        tags: &["Handmade", "Luxury"],
        featured: false,
        rating: 5.0,
        reviews_count: 15,
    },
    SeedProduct {
        slug: "hop-qua-tet-sum-vay",
        name: "Hộp Quà Tết Sum Vầy",
        description: "Kết hợp 3 loại trà thượng hạng, thiết kế sang trọng.",
        long_description: "Hộp quà Tết Sum Vầy mang thông điệp đoàn viên, hạnh phúc. Bên trong là 3 hũ trà thượng hạng: Shan Tuyết, Hồng Trà và Ô Long. Thiết kế hộp sơn mài sang trọng, thích hợp làm quà biếu đối tác, người thân dịp lễ Tết.",
        price: 1_250_000,
        original_price: None,
        weight: "1 set",
        image: "🎁",
        images: &["🎁", "🧧", "✨"],
        category: ProductCategory::Gift,
        tea_type: None,
        origin: None,
        harvest: None,
        taste: None,
        tags: &["Gift Set", "Seasonal"],
        featured: false,
        rating: 4.8,
        reviews_count: 34,
    },
    SeedProduct {
        slug: "tra-pho-nhi-song",
        name: "Trà Phổ Nhĩ Sống 2015",
        description: "Bánh trà nén chặt, càng để lâu càng giá trị.",
        long_description: "Bánh trà Phổ Nhĩ sống được sản xuất năm 2015 từ nguyên liệu Shan Tuyết cổ thụ. Trà có vị chát mạnh ban đầu nhưng ngọt hậu kéo dài, hương thơm của nắng và gió núi rừng. Thích hợp để thưởng thức ngay hoặc lưu trữ lâu dài.",
        price: 1_500_000,
        original_price: None,
        weight: "357g",
        image: "💿",
        images: &["💿", "🕰️", "🏔️"],
        category: ProductCategory::Tea,
        tea_type: Some(TeaType::Black),
        origin: Some("Hà Giang"),
        harvest: Some("2015"),
        taste: Some("Mạnh mẽ, ngọt hậu, hương gỗ"),
        tags: &["Aged", "Collector"],
        featured: false,
        rating: 4.9,
        reviews_count: 28,
    },
];

/// Upsert the launch catalog. Returns the number of products written.
pub fn seed_products(conn: &Connection) -> Result<usize> {
    let now = Utc::now().to_rfc3339();
    for seed in LAUNCH_CATALOG {
        let product = Product {
            id: gen_id(),
            slug: seed.slug.to_string(),
            name: seed.name.to_string(),
            description: Some(seed.description.to_string()),
            long_description: Some(seed.long_description.to_string()),
            price: seed.price,
            original_price: seed.original_price,
            weight: Some(seed.weight.to_string()),
            image: Some(seed.image.to_string()),
            images: seed.images.iter().map(|s| s.to_string()).collect(),
            category: seed.category,
            tea_type: seed.tea_type,
            origin: seed.origin.map(str::to_string),
            harvest: seed.harvest.map(str::to_string),
            taste: seed.taste.map(str::to_string),
            tags: seed.tags.iter().map(|s| s.to_string()).collect(),
            in_stock: true,
            featured: seed.featured,
            rating: seed.rating,
            reviews_count: seed.reviews_count,
            created_at: now.clone(),
            updated_at: now.clone(),
        };
        queries::upsert_product_by_slug(conn, &product)?;
        tracing::info!(slug = seed.slug, "seeded product");
    }
    Ok(LAUNCH_CATALOG.len())
}
