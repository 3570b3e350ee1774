mod fusion_tests;
mod write_view_tests;
