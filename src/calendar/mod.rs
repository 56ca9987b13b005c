pub mod agenda;
pub mod arithmetic;
pub mod error;
pub mod index;
pub mod item;
pub mod memo;
pub mod store;
pub mod week;

pub use agenda::{project, AnnotatedItem, MonthSection};
pub use error::{ScheduleError, StoreError, TimeFormatError};
pub use index::EventsIndex;
pub use item::{ItemKind, ParsedItem, ScheduleItem};
pub use memo::{AgendaMemo, WeekMemo};
pub use store::Store;
pub use week::{build_week, WeekCell, WeekGrid};
