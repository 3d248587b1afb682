//! # Page Events
//!
//! Everything that can happen to the page, as one enum. The event loop
//! receives these from a single channel and handles them one at a time.
//!
//! ## Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stdin line "add mug-02" ──► parse ──┐                                  │
//! │                                      │                                  │
//! │  autoplay task (every 5 s) ──────────┼──► mpsc ──► Storefront::handle   │
//! │                                      │                                  │
//! │  notification timer (2 s) ───────────┘                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Command Lines
//! | Line                     | Event                                     |
//! |--------------------------|-------------------------------------------|
//! | `add <product-id>`       | "Add to cart" on a product card           |
//! | `inc <id>` / `dec <id>`  | +/- control in the cart panel             |
//! | `remove <id>`            | × control in the cart panel               |
//! | `qty <id> <n>`           | set a quantity directly                   |
//! | `clear` / `checkout`     | cart panel footer buttons                 |
//! | `toggle`                 | cart icon                                 |
//! | `currency <code>`        | currency selector                         |
//! | `sort <asc\|desc>`       | sort selector                             |
//! | `next` / `prev`          | slider arrows                             |
//! | `dot <k>`                | indicator dot k                           |
//! | `swipe <from> <to>`      | touchstart at `from`, touchend at `to`    |
//! | `order <card> <MM/YY>`   | order form submit                         |
//! | `show`                   | print the page                            |
//! | `quit`                   | close the page                            |

use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;
use crate::view::{CartAction, ControlKind};

/// Slider inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselInput {
    Next,
    Prev,
    GoTo(usize),
    TouchStart(f64),
    TouchEnd(f64),
}

/// One input to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// "Add to cart" on the product card with this id.
    AddToCart { product_id: String },
    /// A cart panel control, looked up in the current render.
    CartControl { product_id: String, control: ControlKind },
    /// A typed cart action.
    Cart(CartAction),
    /// Cart icon clicked.
    ToggleCart,
    /// Currency selector changed; the raw option value.
    SelectCurrency(String),
    /// Sort selector changed; the raw option value.
    SelectSort(String),
    Carousel(CarouselInput),
    /// Autoplay timer fired.
    AutoplayTick,
    /// Order form submitted.
    SubmitOrder { card_number: String, expiry: String },
    /// A notification's display time is over.
    DismissNotification(Uuid),
    /// Print the page.
    Show,
    Quit,
}

impl PageEvent {
    /// True for events a person caused, as opposed to timers.
    pub fn is_user_input(&self) -> bool {
        !matches!(
            self,
            PageEvent::AutoplayTick | PageEvent::DismissNotification(_)
        )
    }
}

/// Parses one command line into the events it stands for.
///
/// Most lines are a single event; `swipe` is a touch start plus a touch end.
/// Blank lines yield nothing.
pub fn parse_line(line: &str) -> Result<Vec<PageEvent>, AppError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Vec::new());
    };
    let args: Vec<&str> = words.collect();

    let event = match command.to_ascii_lowercase().as_str() {
        "add" => PageEvent::AddToCart {
            product_id: one_arg("add", &args)?.to_string(),
        },
        "inc" => PageEvent::CartControl {
            product_id: one_arg("inc", &args)?.to_string(),
            control: ControlKind::Increment,
        },
        "dec" => PageEvent::CartControl {
            product_id: one_arg("dec", &args)?.to_string(),
            control: ControlKind::Decrement,
        },
        "remove" | "rm" => PageEvent::Cart(CartAction::Remove {
            id: one_arg("remove", &args)?.to_string(),
        }),
        "qty" => {
            let [id, quantity] = args.as_slice() else {
                return Err(AppError::invalid_argument("qty", "usage: qty <id> <n>"));
            };
            let quantity = quantity
                .parse::<i64>()
                .map_err(|_| AppError::invalid_argument("qty", "expected a whole number"))?;
            PageEvent::Cart(CartAction::SetQuantity {
                id: id.to_string(),
                quantity,
            })
        }
        "clear" => PageEvent::Cart(CartAction::Clear),
        "checkout" => PageEvent::Cart(CartAction::Checkout),
        "toggle" | "cart" => PageEvent::ToggleCart,
        "currency" => PageEvent::SelectCurrency(one_arg("currency", &args)?.to_string()),
        "sort" => PageEvent::SelectSort(one_arg("sort", &args)?.to_string()),
        "next" => PageEvent::Carousel(CarouselInput::Next),
        "prev" => PageEvent::Carousel(CarouselInput::Prev),
        "dot" => {
            let index = one_arg("dot", &args)?
                .parse::<usize>()
                .map_err(|_| AppError::invalid_argument("dot", "expected a slide index"))?;
            PageEvent::Carousel(CarouselInput::GoTo(index))
        }
        "swipe" => {
            let [from, to] = args.as_slice() else {
                return Err(AppError::invalid_argument("swipe", "usage: swipe <from-x> <to-x>"));
            };
            let parse = |s: &str| {
                s.parse::<f64>()
                    .ok()
                    .filter(|x| x.is_finite())
                    .ok_or_else(|| AppError::invalid_argument("swipe", "expected coordinates"))
            };
            return Ok(vec![
                PageEvent::Carousel(CarouselInput::TouchStart(parse(*from)?)),
                PageEvent::Carousel(CarouselInput::TouchEnd(parse(*to)?)),
            ]);
        }
        "order" => {
            let [card_number, expiry] = args.as_slice() else {
                return Err(AppError::invalid_argument("order", "usage: order <card> <MM/YY>"));
            };
            PageEvent::SubmitOrder {
                card_number: card_number.to_string(),
                expiry: expiry.to_string(),
            }
        }
        "show" => PageEvent::Show,
        "quit" | "exit" => PageEvent::Quit,
        other => return Err(AppError::UnknownCommand(other.to_string())),
    };

    Ok(vec![event])
}

fn one_arg<'a>(command: &'static str, args: &[&'a str]) -> Result<&'a str, AppError> {
    match args {
        [arg] => Ok(*arg),
        _ => Err(AppError::invalid_argument(command, "expected one argument")),
    }
}

impl FromStr for PageEvent {
    type Err = AppError;

    /// Parses a line that stands for exactly one event.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut events = parse_line(s)?;
        match events.len() {
            1 => Ok(events.remove(0)),
            0 => Err(AppError::UnknownCommand(String::new())),
            _ => Err(AppError::UnknownCommand(s.trim().to_string())),
        }
    }
}
