mod api_books_stress;
mod unit_config;
