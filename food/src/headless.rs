//! Headless mode for the food picker.
//!
//! A simple line-oriented shell over a [`FoodStore`], suitable for a
//! terminal or for scripted use. One command per line; output lines are
//! tagged `[PICK]`, `[MENU]`, `[ERROR]` and so on.

use crate::shuffle::ShuffleEffect;
use food_core::{shopping_list, Dish, FoodStore, MealCategory, Nutrition, NutritionLevel};
use rand::Rng;
use std::io::{self, BufRead, Write};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pick {
        category: MealCategory,
        count: usize,
    },
    Shuffle {
        category: MealCategory,
    },
    Add {
        category: MealCategory,
        name: String,
        materials: Vec<String>,
        nutrition: Nutrition,
        tags: Vec<String>,
    },
    Remove {
        category: MealCategory,
        name: String,
    },
    Plan {
        category: MealCategory,
        names: Vec<String>,
    },
    Reset,
    Clear,
    Menu {
        category: Option<MealCategory>,
    },
    History,
    Shop,
    Help,
    Quit,
}

/// Whether the shell should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn split_list(s: &str) -> Vec<String> {
    s.split([',', '，'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_nutrition(s: &str) -> Result<Nutrition, String> {
    let mut nutrition = Nutrition::new();
    for pair in split_list(s) {
        let (kind, label) = pair
            .split_once('=')
            .ok_or_else(|| format!("Expected kind=level, got '{pair}'"))?;
        let level = NutritionLevel::from_label(label)
            .ok_or_else(|| format!("Unknown nutrition level '{}'", label.trim()))?;
        nutrition.insert(kind.trim().to_string(), level);
    }
    Ok(nutrition)
}

/// Parse one input line.
///
/// `add` and `plan` use `|` to separate fields so names may contain spaces:
/// `add dinner Tomato soup | tomato, egg | calorie=low | home`.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let (first, tail) = match rest.split_once(char::is_whitespace) {
        Some((first, tail)) => (first, tail.trim()),
        None => (rest, ""),
    };

    match verb.to_lowercase().as_str() {
        "pick" => {
            if first.is_empty() {
                return Err("Usage: pick <category> [count]".to_string());
            }
            let count = if tail.is_empty() {
                1
            } else {
                tail.parse()
                    .map_err(|_| format!("Invalid count '{tail}'"))?
            };
            Ok(Command::Pick {
                category: first.into(),
                count,
            })
        }
        "shuffle" => {
            if first.is_empty() {
                return Err("Usage: shuffle <category>".to_string());
            }
            Ok(Command::Shuffle {
                category: first.into(),
            })
        }
        "add" => {
            let mut fields = tail.split('|').map(str::trim);
            let name = fields.next().unwrap_or_default();
            if first.is_empty() || name.is_empty() {
                return Err(
                    "Usage: add <category> <name> [| materials | kind=level,... | tags]"
                        .to_string(),
                );
            }
            let materials = fields.next().map(split_list).unwrap_or_default();
            let nutrition = match fields.next() {
                Some(s) => parse_nutrition(s)?,
                None => Nutrition::new(),
            };
            let tags = fields.next().map(split_list).unwrap_or_default();
            Ok(Command::Add {
                category: first.into(),
                name: name.to_string(),
                materials,
                nutrition,
                tags,
            })
        }
        "remove" | "rm" => {
            if first.is_empty() || tail.is_empty() {
                return Err("Usage: remove <category> <name>".to_string());
            }
            Ok(Command::Remove {
                category: first.into(),
                name: tail.to_string(),
            })
        }
        "plan" => {
            if first.is_empty() {
                return Err("Usage: plan <category> <name>[ | <name>...]".to_string());
            }
            let names = tail
                .split('|')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect();
            Ok(Command::Plan {
                category: first.into(),
                names,
            })
        }
        "reset" => Ok(Command::Reset),
        "clear" => Ok(Command::Clear),
        "menu" => Ok(Command::Menu {
            category: (!first.is_empty()).then(|| first.into()),
        }),
        "history" => Ok(Command::History),
        "shop" => Ok(Command::Shop),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err("Unknown command. Type help for help.".to_string()),
    }
}

fn describe(dish: &Dish) -> String {
    let mut line = dish.name.clone();
    if !dish.materials.is_empty() {
        line.push_str(&format!(" - {}", dish.materials.join(", ")));
    }
    if !dish.nutrition.is_empty() {
        let levels: Vec<String> = dish
            .nutrition
            .iter()
            .map(|(kind, level)| format!("{kind}:{level}"))
            .collect();
        line.push_str(&format!(" [{}]", levels.join(" ")));
    }
    if !dish.tags.is_empty() {
        line.push_str(&format!(" #{}", dish.tags.join(" #")));
    }
    line
}

pub fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  pick <category> [count]     - Pick dishes, avoiding recent picks")?;
    writeln!(out, "  shuffle <category>          - Shuffle on screen, then pick once")?;
    writeln!(out, "  add <category> <name> [| materials | kind=level,... | tags]")?;
    writeln!(out, "                              - Add a dish")?;
    writeln!(out, "  remove <category> <name>    - Remove a dish")?;
    writeln!(out, "  plan <category> <name>[ | <name>...]")?;
    writeln!(out, "                              - Set today's plan for a meal")?;
    writeln!(out, "  menu [category]             - Show the menu")?;
    writeln!(out, "  history                     - Show picked dishes and today's plan")?;
    writeln!(out, "  shop                        - Shopping list for the plan or last pick")?;
    writeln!(out, "  reset                       - Restore the default menu")?;
    writeln!(out, "  clear                       - Clear history and today's plan")?;
    writeln!(out, "  help                        - Show this help")?;
    writeln!(out, "  quit                        - Exit")
}

/// Shell state that lives outside the store.
#[derive(Debug)]
pub struct Shell<R> {
    shuffle: ShuffleEffect,
    rng: R,
    last_pick: Vec<Dish>,
}

impl<R: Rng> Shell<R> {
    pub fn new(shuffle: ShuffleEffect, rng: R) -> Self {
        Self {
            shuffle,
            rng,
            last_pick: Vec::new(),
        }
    }

    /// Run one command against the store.
    pub fn execute<W: Write>(
        &mut self,
        store: &mut FoodStore,
        command: Command,
        out: &mut W,
    ) -> io::Result<Flow> {
        match command {
            Command::Pick { category, count } => {
                let result = if count == 1 {
                    store.pick(&category).map(|dish| vec![dish])
                } else {
                    store.pick_many(&category, count)
                };
                match result {
                    Ok(dishes) if dishes.is_empty() => {
                        writeln!(out, "[PICK] Nothing picked from {category}")?;
                    }
                    Ok(dishes) => {
                        for dish in &dishes {
                            writeln!(out, "[PICK] {}", describe(dish))?;
                        }
                        self.last_pick = dishes;
                    }
                    Err(e) => writeln!(out, "[ERROR] {e}")?,
                }
            }
            Command::Shuffle { category } => {
                match self.shuffle.run(store, &category, &mut self.rng, out)? {
                    Ok(dish) => {
                        writeln!(out, "[PICK] {}", describe(&dish))?;
                        self.last_pick = vec![dish];
                    }
                    Err(e) => writeln!(out, "[ERROR] {e}")?,
                }
            }
            Command::Add {
                category,
                name,
                materials,
                nutrition,
                tags,
            } => {
                if store.add_dish(category.clone(), name.clone(), materials, nutrition, tags) {
                    writeln!(out, "[ADDED] {name} to {category}")?;
                } else {
                    writeln!(out, "[SKIPPED] {name} already exists in {category}")?;
                }
            }
            Command::Remove { category, name } => {
                if store.remove_dish(&category, &name) {
                    writeln!(out, "[REMOVED] {name} from {category}")?;
                } else {
                    writeln!(out, "[SKIPPED] {name} not found in {category}")?;
                }
            }
            Command::Plan { category, names } => {
                let mut dishes = Vec::with_capacity(names.len());
                for name in &names {
                    match store.dish(&category, name) {
                        Some(dish) => dishes.push(dish.clone()),
                        None => {
                            writeln!(out, "[ERROR] {name} not found in {category}")?;
                            return Ok(Flow::Continue);
                        }
                    }
                }
                if store.set_plan(&category, dishes) {
                    writeln!(out, "[PLAN] {category}: {}", names.join(", "))?;
                } else {
                    writeln!(out, "[ERROR] Unknown category {category}")?;
                }
            }
            Command::Reset => {
                store.reset_menu();
                writeln!(out, "[RESET] Menu restored to defaults")?;
            }
            Command::Clear => {
                store.clear_history();
                self.last_pick.clear();
                writeln!(out, "[CLEARED] History and today's plan cleared")?;
            }
            Command::Menu { category } => {
                let categories = match category {
                    Some(category) => vec![category],
                    None => store.categories(),
                };
                for category in categories {
                    let dishes = store.menu().dishes(&category);
                    writeln!(out, "[MENU] {category} ({})", dishes.len())?;
                    for dish in dishes {
                        writeln!(out, "  {}", describe(dish))?;
                    }
                }
            }
            Command::History => {
                writeln!(out, "[HISTORY] {} dishes", store.history().len())?;
                for name in store.history() {
                    writeln!(out, "  {name}")?;
                }
                for (category, dishes) in store.plan().iter() {
                    if !dishes.is_empty() {
                        let names: Vec<&str> = dishes.iter().map(|d| d.name.as_str()).collect();
                        writeln!(out, "[PLAN] {category}: {}", names.join(", "))?;
                    }
                }
            }
            Command::Shop => {
                let list = if store.plan().is_empty() {
                    shopping_list(&self.last_pick)
                } else {
                    store.plan().shopping_list()
                };
                if list.is_empty() {
                    writeln!(out, "[SHOP] Nothing to buy")?;
                } else {
                    writeln!(out, "[SHOP] {} items", list.len())?;
                    for material in list {
                        writeln!(out, "  - {material}")?;
                    }
                }
            }
            Command::Help => print_help(out)?,
            Command::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Run until end of input or `quit`.
    pub fn run<I: BufRead, W: Write>(
        &mut self,
        store: &mut FoodStore,
        input: I,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(out, "=== Today Food ===")?;
        writeln!(out, "Storage: {}", store.storage_backend())?;
        let summary: Vec<String> = store
            .categories()
            .iter()
            .map(|c| format!("{c} ({})", store.menu().dishes(c).len()))
            .collect();
        writeln!(out, "Menu: {}", summary.join(", "))?;
        writeln!(out)?;
        print_help(out)?;
        writeln!(out)?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let flow = match parse_command(line) {
                Ok(command) => self.execute(store, command, out)?,
                Err(message) => {
                    writeln!(out, "[ERROR] {message}")?;
                    Flow::Continue
                }
            };
            out.flush()?;

            if flow == Flow::Quit {
                break;
            }
        }

        Ok(())
    }
}
