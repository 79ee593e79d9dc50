//! Sample dataset written the first time an empty store is loaded

use super::record::{Dataset, Record};

/// The fixed seed dataset.
///
/// Deterministic: every call returns the same records in the same order.
pub fn seed_dataset() -> Dataset {
    let mut dataset = Dataset::new();

    dataset.insert_collection(
        "users",
        vec![
            Record::with_id(1)
                .field("name", "Иван Иванов")
                .field("email", "ivan@example.com")
                .field("role", "Администратор")
                .field("phone", "+7 900 000-00-01"),
            Record::with_id(2)
                .field("name", "Мария Смирнова")
                .field("email", "maria@example.com")
                .field("role", "Менеджер")
                .field("phone", "+7 900 000-00-02"),
        ],
    );

    dataset.insert_collection(
        "company-groups",
        vec![
            Record::with_id(1)
                .field("name", "Группа Альфа")
                .field("description", "Девелоперские проекты в Москве"),
            Record::with_id(2)
                .field("name", "Группа Бета")
                .field("description", "Региональные проекты"),
        ],
    );

    dataset.insert_collection(
        "contractors",
        vec![
            Record::with_id(1)
                .field("name", "ООО «Альфа Строй»")
                .field("company_group_id", 1)
                .field("type", "Подрядчик"),
            Record::with_id(2)
                .field("name", "ООО «Бета Инвест»")
                .field("company_group_id", 2)
                .field("type", "Клиент"),
        ],
    );

    dataset.insert_collection(
        "contracts",
        vec![Record::with_id(1)
            .field("title", "Подряд на строительство")
            .field("contractor_id", 1)
            .field("value", 15_000_000)],
    );

    dataset.insert_collection(
        "deals",
        vec![
            Record::with_id(1)
                .field("title", "Поставка материалов")
                .field("status_id", 1)
                .field("value", 3_500_000),
            Record::with_id(2)
                .field("title", "Продажа земельного участка")
                .field("status_id", 2)
                .field("value", 48_000_000),
        ],
    );

    dataset.insert_collection(
        "deal-statuses",
        vec![
            Record::with_id(1).field("name", "Новая").field("color", "#0ea5e9"),
            Record::with_id(2).field("name", "В работе").field("color", "#22c55e"),
            Record::with_id(3).field("name", "Закрыта").field("color", "#475569"),
        ],
    );

    dataset
}
