mod changes_are_rendered_as_an_indented_tree;
mod flat_listing_prints_changed_paths;
