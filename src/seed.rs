//! Sample catalog loaded at startup.

use crate::domain::aggregates::NewProduct;
use crate::domain::value_objects::Price;

const IMAGE_BASE: &str = "https://images.unsplash.com";
const IMAGE_PARAMS: &str = "?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300";

// name, description, price, category, stock, image id, rating, review count
const CATALOG: &[(&str, &str, &str, &str, u32, &str, &str, u32)] = &[
    ("Premium Wireless Headphones", "High-quality audio with noise cancellation", "299.99", "Electronics", 24, "photo-1505740420928-5e560c06d30e", "4.8", 128),
    ("MacBook Pro 16\"", "Professional laptop with M2 chip", "2499.99", "Electronics", 8, "photo-1496181133206-80ce9b88a853", "4.9", 89),
    ("Apple Watch Series 9", "Advanced health monitoring", "399.99", "Electronics", 15, "photo-1523275335684-37898b6baf30", "4.7", 201),
    ("Wireless Gaming Mouse", "High precision gaming mouse with RGB lighting", "79.99", "Electronics", 45, "photo-1527864550417-7fd91fc51a46", "4.6", 156),
    ("Classic White Dress Shirt", "Premium cotton dress shirt, perfect for business", "89.99", "Clothing", 32, "photo-1562157873-818bc0726f68", "4.5", 94),
    ("Slim Fit Jeans", "Comfortable dark wash denim jeans", "79.99", "Clothing", 28, "photo-1542272604-787c3835535d", "4.3", 187),
    ("Casual Cotton T-Shirt", "Soft organic cotton t-shirt in various colors", "24.99", "Clothing", 67, "photo-1521572163474-6864f9cf17ab", "4.4", 203),
    ("Leather Bomber Jacket", "Genuine leather jacket with premium finish", "299.99", "Clothing", 12, "photo-1551028719-00167b16eac5", "4.8", 76),
    ("Running Sneakers", "Lightweight athletic shoes with cushioned sole", "129.99", "Shoes", 38, "photo-1549298916-b41d501d3772", "4.6", 142),
    ("Classic Oxford Shoes", "Formal leather oxford shoes for business wear", "179.99", "Shoes", 22, "photo-1529810313688-44ea1c2d81d3", "4.7", 89),
    ("Casual Canvas Sneakers", "Comfortable everyday canvas sneakers", "59.99", "Shoes", 54, "photo-1525966222134-fcfa99b8ae77", "4.3", 167),
    ("Modern Table Lamp", "Minimalist LED table lamp with touch control", "89.99", "Home", 29, "photo-1507003211169-0a1dd7228f2d", "4.5", 93),
    ("Throw Pillow Set", "Set of 2 decorative throw pillows with covers", "39.99", "Home", 41, "photo-1586023492125-27b2c045efd7", "4.4", 124),
    ("Indoor Plant Collection", "Set of 3 easy-care houseplants with pots", "79.99", "Home", 18, "photo-1416879595882-3373a0480b5b", "4.6", 78),
    ("Yoga Mat Premium", "Non-slip eco-friendly yoga mat with carrying strap", "49.99", "Sports", 36, "photo-1506629905607-84970bc8c9e8", "4.5", 156),
    ("Adjustable Dumbbells", "Space-saving adjustable dumbbells 5-50 lbs", "299.99", "Sports", 14, "photo-1571019613454-1cb2f99b2d8b", "4.7", 89),
    ("Resistance Band Set", "Complete set of resistance bands with handles", "29.99", "Sports", 58, "photo-1517836357463-d25dfeac3438", "4.3", 134),
    ("The Science of Well-Being", "Bestselling guide to happiness and mental wellness", "19.99", "Books", 45, "photo-1544947950-fa07a98d237f", "4.6", 267),
    ("Programming Fundamentals", "Complete guide to modern software development", "39.99", "Books", 23, "photo-1532012197267-da84d127e765", "4.8", 156),
    ("Cooking Mastery", "Professional techniques for home chefs", "29.99", "Books", 34, "photo-1507003211169-0a1dd7228f2d", "4.5", 89),
    ("Skincare Routine Kit", "Complete 5-step skincare routine for all skin types", "89.99", "Beauty", 27, "photo-1596462502278-27bfdc403348", "4.7", 178),
    ("Professional Makeup Brushes", "Set of 12 professional makeup brushes with case", "69.99", "Beauty", 31, "photo-1522335789203-aabd1fc54bc9", "4.6", 145),
    ("Premium Coffee Beans", "Single-origin arabica coffee beans, freshly roasted", "24.99", "Food", 76, "photo-1559056199-641a0ac8b55e", "4.8", 203),
    ("Organic Green Tea", "Premium organic green tea leaves, 100 tea bags", "19.99", "Food", 52, "photo-1556679343-c7306c1976bc", "4.5", 167),
    ("Educational Building Blocks", "STEM learning toy set with 200+ colorful blocks", "49.99", "Toys", 38, "photo-1558877385-6b8a1ff2ad38", "4.7", 234),
    ("Remote Control Drone", "Beginner-friendly drone with HD camera", "199.99", "Toys", 19, "photo-1473968512647-3e447244af8f", "4.4", 98),
];

pub fn sample_products() -> Vec<NewProduct> {
    CATALOG.iter()
        .map(|&(name, description, price, category, stock, image, rating, reviews)| NewProduct {
            name: name.to_string(),
            description: description.to_string(),
            price: Price::new(price),
            category: category.to_string(),
            stock: Some(stock),
            image_url: format!("{IMAGE_BASE}/{image}{IMAGE_PARAMS}"),
            rating: Some(rating.to_string()),
            review_count: Some(reviews),
            is_active: Some(true),
        })
        .collect()
}
