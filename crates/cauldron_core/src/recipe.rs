use std::fmt;

use crate::item::Item;

/// Static rule: an ingredient multiset produces `result`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipe {
    result: Item,
    ingredients: Vec<Item>,
}

impl Recipe {
    pub fn new(result: Item, ingredients: Vec<Item>) -> Self {
        Self {
            result,
            ingredients,
        }
    }

    pub fn result(&self) -> &Item {
        &self.result
    }

    pub fn ingredients(&self) -> &[Item] {
        &self.ingredients
    }

    /// Multiset equality by item name. Insertion order of `contents` is
    /// irrelevant; every ingredient must consume exactly one pot item.
    pub fn matches(&self, contents: &[Item]) -> bool {
        if self.ingredients.len() != contents.len() {
            return false;
        }

        let mut scratch: Vec<&Item> = contents.iter().collect();
        for ingredient in &self.ingredients {
            let Some(pos) = scratch.iter().position(|item| item.same_name(ingredient)) else {
                return false;
            };
            scratch.swap_remove(pos);
        }
        scratch.is_empty()
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <=", self.result)?;
        for (idx, ingredient) in self.ingredients.iter().enumerate() {
            if idx == 0 {
                write!(f, " {ingredient}")?;
            } else {
                write!(f, " + {ingredient}")?;
            }
        }
        Ok(())
    }
}

/// Recipes in declaration order. The first match wins.
#[derive(Clone, Debug, Default)]
pub struct RecipeTable {
    recipes: Vec<Recipe>,
}

impl RecipeTable {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn find_match(&self, contents: &[Item]) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.matches(contents))
    }

    pub fn position_of_match(&self, contents: &[Item]) -> Option<usize> {
        self.recipes.iter().position(|recipe| recipe.matches(contents))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> Item {
        Item::ingredient(name, format!("{name}.png"))
    }

    fn potion() -> Recipe {
        Recipe::new(
            Item::finished_product("Potion", "potion.png"),
            vec![item("Herb"), item("Water")],
        )
    }

    #[test]
    fn order_of_contents_does_not_matter() {
        let recipe = potion();
        assert!(recipe.matches(&[item("Water"), item("Herb")]));
        assert!(recipe.matches(&[item("Herb"), item("Water")]));
    }

    #[test]
    fn size_mismatch_never_matches() {
        let recipe = Recipe::new(
            item("Elixir"),
            vec![item("A"), item("B"), item("C")],
        );
        assert!(!recipe.matches(&[item("A"), item("B")]));
        assert!(!recipe.matches(&[item("A"), item("B"), item("C"), item("C")]));
    }

    #[test]
    fn duplicates_must_be_matched_by_count() {
        let recipe = Recipe::new(item("Brine"), vec![item("Salt"), item("Salt"), item("Water")]);
        assert!(recipe.matches(&[item("Salt"), item("Water"), item("Salt")]));
        assert!(!recipe.matches(&[item("Salt"), item("Water"), item("Water")]));
    }

    #[test]
    fn matches_by_name_not_image() {
        let recipe = potion();
        let herb = Item::ingredient("Herb", "another-herb.png");
        assert!(recipe.matches(&[herb, item("Water")]));
    }

    #[test]
    fn first_declared_recipe_wins() {
        let table = RecipeTable::new(vec![
            Recipe::new(item("First"), vec![item("A"), item("B")]),
            Recipe::new(item("Second"), vec![item("B"), item("A")]),
        ]);
        let found = table.find_match(&[item("B"), item("A")]);
        assert_eq!(found.map(|r| r.result().name()), Some("First"));
        assert_eq!(table.position_of_match(&[item("A"), item("B")]), Some(0));
    }

    #[test]
    fn empty_recipe_matches_only_an_empty_pot() {
        let recipe = Recipe::new(item("Air"), Vec::new());
        assert!(recipe.matches(&[]));
        assert!(!recipe.matches(&[item("Herb")]));
    }

    #[test]
    fn display_lists_ingredients() {
        insta::assert_snapshot!(potion().to_string(), @"Potion <= Herb + Water");
    }
}
