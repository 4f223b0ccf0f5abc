// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static sample catalog used to fabricate abandoned carts.

use crate::types::{Customer, Product};

/// (id, name, phone, email, location, total_orders, avg_order_value)
const CUSTOMERS: [(u32, &str, &str, &str, &str, u32, u64); 5] = [
    (1, "Rajesh Kumar", "+91-9876543210", "rajesh.kumar@email.com", "Mumbai, Maharashtra", 5, 2500),
    (2, "Priya Sharma", "+91-9876543211", "priya.sharma@email.com", "Delhi, NCR", 12, 1800),
    (3, "Amit Patel", "+91-9876543212", "amit.patel@email.com", "Bangalore, Karnataka", 3, 3200),
    (4, "Sneha Reddy", "+91-9876543213", "sneha.reddy@email.com", "Hyderabad, Telangana", 8, 2100),
    (5, "Vikram Singh", "+91-9876543214", "vikram.singh@email.com", "Pune, Maharashtra", 15, 1500),
];

/// (id, name, price, category)
const PRODUCTS: [(u32, &str, u64, &str); 8] = [
    (1, "Wireless Headphones", 2999, "Electronics"),
    (2, "Smart Watch", 8999, "Electronics"),
    (3, "Running Shoes", 2499, "Sports"),
    (4, "Laptop Bag", 1299, "Accessories"),
    (5, "Bluetooth Speaker", 1999, "Electronics"),
    (6, "Fitness Tracker", 3999, "Sports"),
    (7, "Phone Case", 499, "Accessories"),
    (8, "Power Bank", 1499, "Electronics"),
];

/// The sample customer catalog.
pub fn sample_customers() -> Vec<Customer> {
    CUSTOMERS
        .iter()
        .map(
            |&(id, name, phone, email, location, total_orders, avg_order_value)| Customer {
                id,
                name: name.to_string(),
                phone: phone.to_string(),
                email: email.to_string(),
                location: location.to_string(),
                total_orders,
                avg_order_value,
            },
        )
        .collect()
}

/// The static product catalog.
pub fn sample_products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|&(id, name, price, category)| Product {
            id,
            name: name.to_string(),
            price,
            category: category.to_string(),
        })
        .collect()
}
