mod property_tests;
mod query_composer_tests;
