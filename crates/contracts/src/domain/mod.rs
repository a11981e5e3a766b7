pub mod a001_jewellery;
