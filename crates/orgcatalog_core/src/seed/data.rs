//! Static demo dataset: central Moscow buildings and their tenants.

pub(super) struct CategorySeed {
    pub name: &'static str,
    pub children: &'static [CategorySeed],
}

pub(super) struct OrganizationSeed {
    pub name: &'static str,
    /// Index into [`BUILDINGS`].
    pub building: usize,
    pub categories: &'static [&'static str],
    pub phones: &'static [&'static str],
}

const fn leaf(name: &'static str) -> CategorySeed {
    CategorySeed { name, children: &[] }
}

pub(super) const BUILDINGS: [(&str, f64, f64); 10] = [
    ("ул. Ленина, 1, офис 3", 55.7558, 37.6176),
    ("пр. Мира, 15, БЦ 'Мир'", 55.7601, 37.6325),
    ("ул. Тверская, 7, офис 12", 55.7652, 37.6034),
    ("ул. Новый Арбат, 24", 55.7528, 37.5973),
    ("ул. Мясницкая, 30/1/2", 55.7625, 37.6398),
    ("пр. Вернадского, 78", 55.6602, 37.4805),
    ("ул. Профсоюзная, 61", 55.6421, 37.5325),
    ("Ленинградский пр-т, 80", 55.8021, 37.5132),
    ("ул. 1905 года, 7", 55.7658, 37.5612),
    ("Бережковская наб., 20", 55.7321, 37.5543),
];

const FOOD: &str = "Еда";
const CARS: &str = "Автомобили";
const IT: &str = "IT и технологии";
const HEALTH: &str = "Медицина и здоровье";
const EDUCATION: &str = "Образование";
const MEAT: &str = "Мясная продукция";
const DAIRY: &str = "Молочная продукция";
const BAKERY: &str = "Хлебобулочные изделия";
const TRUCKS: &str = "Грузовые автомобили";
const PASSENGER: &str = "Легковые автомобили";
const AUTO_PARTS: &str = "Автозапчасти";
const SOFTWARE: &str = "Разработка ПО";
const HARDWARE: &str = "Компьютерная техника";
const CLINICS: &str = "Клиники";
const PHARMACY: &str = "Аптеки";
const SCHOOLS: &str = "Школы";
const UNIVERSITIES: &str = "ВУЗы";
const DIAGNOSTICS: &str = "Диагностика автомобилей";
const TIRES: &str = "Шины и диски";
const WEB: &str = "Веб-разработка";
const MOBILE: &str = "Мобильные приложения";
const DENTISTRY: &str = "Стоматология";

pub(super) const CATEGORY_TREE: &[CategorySeed] = &[
    CategorySeed {
        name: FOOD,
        children: &[leaf(MEAT), leaf(DAIRY), leaf(BAKERY)],
    },
    CategorySeed {
        name: CARS,
        children: &[
            leaf(TRUCKS),
            leaf(PASSENGER),
            CategorySeed {
                name: AUTO_PARTS,
                children: &[leaf(DIAGNOSTICS), leaf(TIRES)],
            },
        ],
    },
    CategorySeed {
        name: IT,
        children: &[
            CategorySeed {
                name: SOFTWARE,
                children: &[leaf(WEB), leaf(MOBILE)],
            },
            leaf(HARDWARE),
        ],
    },
    CategorySeed {
        name: HEALTH,
        children: &[
            CategorySeed {
                name: CLINICS,
                children: &[leaf(DENTISTRY)],
            },
            leaf(PHARMACY),
        ],
    },
    CategorySeed {
        name: EDUCATION,
        children: &[leaf(SCHOOLS), leaf(UNIVERSITIES)],
    },
];

pub(super) const ORGANIZATIONS: &[OrganizationSeed] = &[
    OrganizationSeed {
        name: "ООО 'Рога и Копыта'",
        building: 0,
        categories: &[MEAT, DAIRY],
        phones: &["+7 (495) 123-45-67", "+7 (495) 765-43-21"],
    },
    OrganizationSeed {
        name: "Мясной Дом 'Богатырь'",
        building: 1,
        categories: &[MEAT],
        phones: &["+7 (495) 234-56-78", "8-800-555-35-35"],
    },
    OrganizationSeed {
        name: "Молоко-Завод №1",
        building: 2,
        categories: &[DAIRY],
        phones: &["+7 (495) 345-67-89"],
    },
    OrganizationSeed {
        name: "Пекарня 'Хлебосол'",
        building: 3,
        categories: &[BAKERY],
        phones: &["+7 (495) 456-78-90", "+7 (916) 123-45-67"],
    },
    OrganizationSeed {
        name: "Автосалон 'Премиум'",
        building: 4,
        categories: &[PASSENGER],
        phones: &["+7 (495) 567-89-01", "+7 (925) 555-66-77"],
    },
    OrganizationSeed {
        name: "Грузовик-Центр",
        building: 5,
        categories: &[TRUCKS],
        phones: &["+7 (495) 678-90-12"],
    },
    OrganizationSeed {
        name: "Запчасти-24",
        building: 6,
        categories: &[AUTO_PARTS, DIAGNOSTICS],
        phones: &["+7 (495) 789-01-23", "8-800-222-33-44"],
    },
    OrganizationSeed {
        name: "Шинный центр",
        building: 7,
        categories: &[TIRES],
        phones: &["+7 (495) 890-12-34"],
    },
    OrganizationSeed {
        name: "IT-Групп 'Софт'",
        building: 8,
        categories: &[SOFTWARE, WEB],
        phones: &["+7 (495) 901-23-45", "+7 (903) 111-22-33"],
    },
    OrganizationSeed {
        name: "Мобильные Решения",
        building: 9,
        categories: &[MOBILE],
        phones: &["+7 (495) 012-34-56"],
    },
    OrganizationSeed {
        name: "Компьютерный Мир",
        building: 0,
        categories: &[HARDWARE],
        phones: &["+7 (495) 123-45-67", "+7 (495) 234-56-78"],
    },
    OrganizationSeed {
        name: "Клиника 'Здоровье'",
        building: 1,
        categories: &[CLINICS, DENTISTRY],
        phones: &["+7 (495) 345-67-89", "8-800-777-88-99"],
    },
    OrganizationSeed {
        name: "Аптека 'Фарма'",
        building: 2,
        categories: &[PHARMACY],
        phones: &["+7 (495) 456-78-90"],
    },
    OrganizationSeed {
        name: "Школа №42",
        building: 3,
        categories: &[SCHOOLS],
        phones: &["+7 (495) 567-89-01"],
    },
    OrganizationSeed {
        name: "МГУ имени Ломоносова",
        building: 4,
        categories: &[UNIVERSITIES],
        phones: &["+7 (495) 678-90-12", "+7 (495) 789-01-23"],
    },
    OrganizationSeed {
        name: "Стоматология 'Дент'",
        building: 5,
        categories: &[DENTISTRY],
        phones: &["+7 (495) 890-12-34"],
    },
    OrganizationSeed {
        name: "Ресторан 'Еда'",
        building: 6,
        categories: &[FOOD],
        phones: &["+7 (495) 901-23-45"],
    },
    OrganizationSeed {
        name: "Пивоварня 'Жигули'",
        building: 7,
        categories: &[FOOD],
        phones: &["+7 (495) 012-34-56"],
    },
    OrganizationSeed {
        name: "Автосервис 'Профи'",
        building: 8,
        categories: &[DIAGNOSTICS, TIRES],
        phones: &["+7 (495) 123-45-67"],
    },
    OrganizationSeed {
        name: "IT-Академия",
        building: 9,
        categories: &[EDUCATION, SOFTWARE],
        phones: &["+7 (495) 234-56-78", "+7 (915) 333-44-55"],
    },
];
