//! Static value pools records draw from.

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Barbara", "David", "Elizabeth", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Christopher", "Nancy", "Daniel", "Lisa", "Matthew", "Betty", "Anthony",
    "Margaret", "Mark", "Sandra", "Donald", "Ashley", "Steven", "Kimberly", "Paul", "Emily",
    "Andrew", "Donna", "Joshua", "Michelle",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker",
];

pub const CITIES: &[&str] = &[
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "San Antonio",
    "San Diego",
    "Dallas",
    "San Jose",
    "Austin",
    "Jacksonville",
];

pub const STATES: &[&str] = &["CA", "TX", "FL", "NY", "PA", "IL", "OH", "GA", "NC", "MI"];

pub const COUNTRIES: &[&str] = &["USA", "Canada", "UK", "Germany", "France", "Spain", "Italy"];

pub const EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

pub const PRODUCT_CATEGORIES: &[&str] =
    &["Electronics", "Clothing", "Books", "Home", "Sports", "Toys"];

pub const PRODUCT_ADJECTIVES: &[&str] = &["Premium", "Deluxe", "Pro", "Elite", "Smart", "Classic"];

pub const PRODUCT_NOUNS: &[&str] = &["Widget", "Gadget", "Device", "Tool", "Kit", "System"];

pub const PAYMENT_METHODS: &[&str] = &[
    "Credit Card",
    "Debit Card",
    "PayPal",
    "Bank Transfer",
    "Cash",
];

pub const ORDER_STATUSES: &[&str] = &[
    "Pending",
    "Processing",
    "Shipped",
    "Delivered",
    "Cancelled",
];
