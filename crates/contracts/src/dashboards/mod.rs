pub mod d400_price_test_results;
