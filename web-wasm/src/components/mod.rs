pub mod council_filter;
pub mod detail_drawer;
pub mod map_skeleton;
pub mod property_map;
