//! # Menu Catalog
//!
//! The static dish list. Lookups are by id; filtering is a linear scan, which is all
//! a couple of dozen dishes need.

use crate::model::{Category, MenuFilter, MenuItem, MenuItemId, MenuTag, SpiceLevel};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn from_items(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The restaurant's menu.
    #[rustfmt::skip]
    pub fn standard() -> Self {
        use Category::*;
        use MenuTag::*;
        use SpiceLevel::*;

        let items = vec![
            dish(1, "Veg Spring Rolls", "Crisp rolls stuffed with cabbage, carrot and glass noodles, served with sweet chilli dip", 180.0, Starters, true, Mild, &[Popular]),
            dish(2, "Chilli Paneer", "Cottage cheese tossed with capsicum, onion and green chilli in a dark soy glaze", 260.0, Starters, true, Hot, &[Popular]),
            dish(3, "Honey Chilli Potato", "Crispy potato fingers in honey, sesame and red chilli", 220.0, Starters, true, Medium, &[]),
            dish(4, "Chicken Lollipop", "Frenched wings fried golden, with schezwan sauce", 290.0, Starters, false, Hot, &[Popular]),
            dish(5, "Dragon Chicken", "Strips of chicken wok-tossed with cashews and dried red chillies", 310.0, Starters, false, ExtraHot, &[ChefSpecial]),
            dish(6, "Hot and Sour Soup", "Peppery broth with tofu, mushroom and bamboo shoot", 150.0, Soups, true, Medium, &[]),
            dish(7, "Chicken Manchow Soup", "Garlic and coriander broth topped with fried noodles", 170.0, Soups, false, Medium, &[Popular]),
            dish(8, "Sweet Corn Veg Soup", "Creamed corn with finely chopped vegetables", 140.0, Soups, true, Mild, &[]),
            dish(9, "Veg Hakka Noodles", "Thin noodles stir-fried with julienned vegetables", 200.0, Noodles, true, Mild, &[Popular]),
            dish(10, "Chicken Schezwan Noodles", "Noodles tossed in house schezwan sauce with shredded chicken", 250.0, Noodles, false, Hot, &[]),
            dish(11, "Chilli Garlic Noodles", "Burnt garlic, bird's eye chilli and spring onion", 210.0, Noodles, true, Hot, &[New]),
            dish(12, "Veg Fried Rice", "Wok-fried rice with spring onion and seasonal vegetables", 190.0, Rice, true, Mild, &[]),
            dish(13, "Egg Fried Rice", "Fried rice with scrambled egg and white pepper", 210.0, Rice, false, Mild, &[]),
            dish(14, "Schezwan Chicken Fried Rice", "Fiery fried rice with chicken and schezwan paste", 250.0, Rice, false, Hot, &[Popular]),
            dish(15, "Veg Manchurian Gravy", "Vegetable dumplings in a ginger garlic soy gravy", 240.0, MainCourse, true, Medium, &[Popular]),
            dish(16, "Chilli Chicken Gravy", "Chicken with onion and capsicum in a spicy soy gravy", 300.0, MainCourse, false, Hot, &[]),
            dish(17, "Kung Pao Chicken", "Diced chicken with peanuts, dried chillies and Sichuan pepper", 320.0, MainCourse, false, Hot, &[ChefSpecial]),
            dish(18, "Fish in Hot Garlic Sauce", "Basa fillet in a bold garlic and red chilli sauce", 360.0, MainCourse, false, ExtraHot, &[ChefSpecial, New]),
            dish(19, "Veg Crystal Dumplings", "Translucent steamed dumplings with mixed vegetables", 230.0, DimSum, true, Mild, &[New]),
            dish(20, "Chicken Momos", "Steamed dumplings with minced chicken and red chutney", 220.0, DimSum, false, Medium, &[Popular]),
            dish(21, "Honey Noodles with Ice Cream", "Crisp fried noodles in honey and sesame with vanilla ice cream", 180.0, Desserts, true, Mild, &[Popular]),
            dish(22, "Date Pancake", "Thin pancake folded around date paste, served warm", 190.0, Desserts, true, Mild, &[]),
            dish(23, "Jasmine Tea", "A pot of fragrant jasmine green tea", 90.0, Beverages, true, Mild, &[]),
            dish(24, "Lemon Iced Tea", "House-brewed iced tea with fresh lemon and mint", 110.0, Beverages, true, Mild, &[]),
        ];
        Self { items }
    }

    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn filter(&self, filter: &MenuFilter) -> Vec<&MenuItem> {
        self.items.iter().filter(|item| filter.matches(item)).collect()
    }

    /// Categories that have at least one dish, in display order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| self.items.iter().any(|item| item.category == *category))
            .collect()
    }

    pub fn featured(&self) -> Vec<&MenuItem> {
        self.items.iter().filter(|item| item.is_featured()).collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn dish(
    id: u32,
    name: &str,
    description: &str,
    price: f64,
    category: Category,
    is_veg: bool,
    spice_level: SpiceLevel,
    tags: &[MenuTag],
) -> MenuItem {
    let slug = name.to_lowercase().replace(' ', "-").replace('\'', "");
    MenuItem {
        id: MenuItemId(id),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category,
        is_veg,
        spice_level,
        image: format!("/images/menu/{slug}.jpg"),
        tags: tags.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let catalog = Catalog::standard();
        let mut ids: Vec<_> = catalog.items().iter().map(|item| item.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.get(MenuItemId(7)).unwrap().name, "Chicken Manchow Soup");
        assert!(catalog.get(MenuItemId(999)).is_none());
    }

    #[test]
    fn test_filter_combines_criteria() {
        let catalog = Catalog::standard();

        let veg_starters = catalog.filter(&MenuFilter::default().category(Category::Starters).veg_only());
        assert_eq!(veg_starters.len(), 3);
        assert!(veg_starters.iter().all(|item| item.is_veg));

        let chef = catalog.filter(&MenuFilter::default().tag(MenuTag::ChefSpecial));
        assert_eq!(chef.len(), 3);
    }

    #[test]
    fn test_query_is_case_insensitive_over_name_and_description() {
        let catalog = Catalog::standard();

        let by_name = catalog.filter(&MenuFilter::default().query("MANCHOW"));
        assert_eq!(by_name.len(), 1);

        let by_description = catalog.filter(&MenuFilter::default().query("peanuts"));
        assert_eq!(by_description[0].name, "Kung Pao Chicken");

        let blank = catalog.filter(&MenuFilter::default().query("   "));
        assert_eq!(blank.len(), catalog.len());
    }

    #[test]
    fn test_categories_in_display_order() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.categories(), Category::ALL.to_vec());

        let partial = Catalog::from_items(
            catalog
                .items()
                .iter()
                .filter(|item| matches!(item.category, Category::Desserts | Category::Soups))
                .cloned()
                .collect(),
        );
        assert_eq!(partial.categories(), vec![Category::Soups, Category::Desserts]);
    }

    #[test]
    fn test_featured_are_popular_or_chef_special() {
        let catalog = Catalog::standard();
        let featured = catalog.featured();
        assert!(!featured.is_empty());
        assert!(featured
            .iter()
            .all(|item| item.has_tag(MenuTag::Popular) || item.has_tag(MenuTag::ChefSpecial)));
        assert!(featured.iter().all(|item| item.id != MenuItemId(23)));
    }

    #[test]
    fn test_image_paths() {
        let catalog = Catalog::standard();
        assert_eq!(
            catalog.get(MenuItemId(1)).unwrap().image,
            "/images/menu/veg-spring-rolls.jpg"
        );
    }
}
