use common::model::{ColorAssignment, FieldDefinition, FieldMap};

/// Hands out palette colours to the visible fields in display order
/// (`order`, then key), cycling when there are more fields than colours.
pub fn assign_colors(fields: &FieldMap, palette: &[String]) -> ColorAssignment {
    if palette.is_empty() {
        return ColorAssignment::new();
    }
    let mut visible: Vec<&FieldDefinition> = fields.values().filter(|f| !f.is_hidden()).collect();
    visible.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.placeholder.cmp(&b.placeholder)));
    visible
        .iter()
        .zip(palette.iter().cycle())
        .map(|(field, color)| (field.placeholder.clone(), color.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colours_follow_display_order_and_skip_hidden() {
        let mut fields = FieldMap::new();
        for (key, order) in [("$1", 2), ("$2", 0), ("$3", 1)] {
            let mut field = FieldDefinition::new(key, key);
            field.order = order;
            fields.insert(key.to_string(), field);
        }
        fields.get_mut("$3").unwrap().group = Some("merged_hidden_$2-$3".to_string());

        let palette = vec!["red".to_string(), "blue".to_string()];
        let colors = assign_colors(&fields, &palette);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors["$2"], "red");
        assert_eq!(colors["$1"], "blue");
        assert!(assign_colors(&fields, &[]).is_empty());
    }
}
