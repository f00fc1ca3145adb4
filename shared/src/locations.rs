//! Bangladesh divisions and districts with GPS coordinates
//!
//! Reference data used to resolve a farmer's division/district to
//! coordinates for forecast lookups.

use rust_decimal::Decimal;

use crate::types::GpsCoordinates;

/// A district with its approximate center coordinates
#[derive(Debug, Clone, Copy)]
pub struct District {
    pub name: &'static str,
    pub name_bn: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// An administrative division and its districts
#[derive(Debug, Clone, Copy)]
pub struct Division {
    pub name: &'static str,
    pub name_bn: &'static str,
    pub districts: &'static [District],
}

const fn d(name: &'static str, name_bn: &'static str, latitude: f64, longitude: f64) -> District {
    District {
        name,
        name_bn,
        latitude,
        longitude,
    }
}

/// All eight divisions of Bangladesh
pub const DIVISIONS: &[Division] = &[
    Division {
        name: "Dhaka",
        name_bn: "ঢাকা",
        districts: &[
            d("Dhaka", "ঢাকা", 23.8103, 90.4125),
            d("Gazipur", "গাজীপুর", 23.9999, 90.4203),
            d("Narayanganj", "নারায়ণগঞ্জ", 23.6238, 90.5),
            d("Munshiganj", "মুন্সিগঞ্জ", 23.5513, 90.5),
            d("Shariatpur", "শরীয়তপুর", 23.2156, 90.5),
            d("Rajbari", "রাজবাড়ী", 23.7574, 89.7667),
            d("Faridpur", "ফরিদপুর", 23.6122, 89.8333),
            d("Tangail", "টাঙ্গাইল", 24.25, 89.9167),
            d("Manikganj", "মানিকগঞ্জ", 23.8636, 90.1833),
            d("Madaripur", "মাদারীপুর", 23.1667, 90.1944),
            d("Narsingdi", "নরসিংদী", 23.9167, 90.7167),
            d("Kishoreganj", "কিশোরগঞ্জ", 24.4333, 90.7667),
        ],
    },
    Division {
        name: "Chattogram",
        name_bn: "চট্টগ্রাম",
        districts: &[
            d("Chattogram", "চট্টগ্রাম", 22.3569, 91.7832),
            d("Cox's Bazar", "কক্সবাজার", 21.4272, 92.0058),
            d("Khagrachhari", "খাগড়াছড়ি", 22.475, 91.9833),
            d("Rangamati", "রাঙ্গামাটি", 22.6667, 92.2),
            d("Bandarban", "বান্দরবান", 22.1667, 92.2167),
            d("Cumilla", "কুমিল্লা", 23.4636, 91.1833),
            d("Noakhali", "নোয়াখালী", 22.8292, 91.0869),
            d("Feni", "ফেনী", 23.0167, 91.4),
            d("Lakshmipur", "লক্ষ্মীপুর", 22.9428, 90.8378),
            d("Chandpur", "চাঁদপুর", 23.2186, 90.6706),
        ],
    },
    Division {
        name: "Khulna",
        name_bn: "খুলনা",
        districts: &[
            d("Khulna", "খুলনা", 22.8456, 89.5403),
            d("Bagerhat", "বাগেরহাট", 22.6833, 89.7833),
            d("Satkhira", "সাতক্ষীরা", 22.75, 89.0),
            d("Jashore", "যশোর", 23.1667, 89.1667),
            d("Jhenaidah", "ঝিনাইদহ", 23.3667, 89.15),
            d("Narail", "নড়াইল", 23.1833, 89.4333),
            d("Pirojpur", "পিরোজপুর", 22.5833, 89.75),
            d("Meherpur", "মেহেরপুর", 23.7667, 88.6333),
            d("Kushtia", "কুষ্টিয়া", 23.9167, 89.1167),
        ],
    },
    Division {
        name: "Barisal",
        name_bn: "বরিশাল",
        districts: &[
            d("Barisal", "বরিশাল", 22.7018, 90.3635),
            d("Bhola", "ভোলা", 22.5833, 90.6667),
            d("Jhalokathi", "ঝালকাঠি", 22.6389, 90.1944),
            d("Patuakhali", "পটুয়াখালী", 22.3596, 90.3281),
            d("Gopalganj", "গোপালগঞ্জ", 23.0046, 90.6667),
            d("Barguna", "বরগুনা", 22.0953, 90.1122),
        ],
    },
    Division {
        name: "Sylhet",
        name_bn: "সিলেট",
        districts: &[
            d("Sylhet", "সিলেট", 24.8917, 91.8722),
            d("Moulvibazar", "মৌলভীবাজার", 24.4828, 91.7675),
            d("Sunamganj", "সুনামগঞ্জ", 25.2656, 91.4045),
            d("Habiganj", "হবিগঞ্জ", 24.3744, 91.2756),
        ],
    },
    Division {
        name: "Rajshahi",
        name_bn: "রাজশাহী",
        districts: &[
            d("Rajshahi", "রাজশাহী", 24.3745, 88.6042),
            d("Naogaon", "নওগাঁ", 24.7936, 88.9318),
            d("Pabna", "পাবনা", 23.95, 89.25),
            d("Bogura", "বগুড়া", 24.85, 89.3667),
            d("Sirajganj", "সিরাজগঞ্জ", 24.4556, 89.7),
            d("Natore", "নাটোর", 24.4269, 89.0),
            d("Chapainawabganj", "চাঁপাইনবাবগঞ্জ", 24.5975, 88.2667),
            d("Joypurhat", "জয়পুরহাট", 25.1667, 89.0167),
        ],
    },
    Division {
        name: "Rangpur",
        name_bn: "রংপুর",
        districts: &[
            d("Rangpur", "রংপুর", 25.7439, 89.2722),
            d("Dinajpur", "দিনাজপুর", 25.6217, 88.6406),
            d("Thakurgaon", "ঠাকুরগাঁও", 26.0337, 88.4616),
            d("Kurigram", "কুড়িগ্রাম", 25.805, 89.7317),
            d("Lalmonirhat", "লালমনিরহাট", 25.9167, 89.8333),
            d("Nilphamari", "নীলফামারী", 25.4667, 89.5333),
            d("Gaibandha", "গাইবান্ধা", 25.3281, 89.5356),
            d("Panchagarh", "পঞ্চগড়", 26.3344, 88.5546),
        ],
    },
    Division {
        name: "Mymensingh",
        name_bn: "ময়মনসিংহ",
        districts: &[
            d("Mymensingh", "ময়মনসিংহ", 24.7471, 90.4203),
            d("Netrokona", "নেত্রকোনা", 24.4333, 90.7167),
            d("Jamalpur", "জামালপুর", 24.9417, 89.9375),
            d("Sherpur", "শেরপুর", 25.1667, 90.0167),
        ],
    },
];

/// Look up a division by English or Bangla name
pub fn find_division(name: &str) -> Option<&'static Division> {
    DIVISIONS
        .iter()
        .find(|div| div.name.eq_ignore_ascii_case(name) || div.name_bn == name)
}

/// Look up a district within a division by English or Bangla name
pub fn find_district(division: &str, district: &str) -> Option<&'static District> {
    find_division(division)?
        .districts
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(district) || d.name_bn == district)
}

/// Coordinates for a district, if both names resolve
pub fn district_coordinates(division: &str, district: &str) -> Option<GpsCoordinates> {
    let district = find_district(division, district)?;
    Some(GpsCoordinates::new(
        Decimal::from_f64_retain(district.latitude).unwrap_or_default(),
        Decimal::from_f64_retain(district.longitude).unwrap_or_default(),
    ))
}

/// All division names (English)
pub fn division_names() -> Vec<&'static str> {
    DIVISIONS.iter().map(|d| d.name).collect()
}

/// All district names (English) within a division
pub fn district_names(division: &str) -> Option<Vec<&'static str>> {
    Some(
        find_division(division)?
            .districts
            .iter()
            .map(|d| d.name)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_divisions() {
        assert_eq!(DIVISIONS.len(), 8);
    }

    #[test]
    fn lookup_by_english_name_is_case_insensitive() {
        assert!(find_district("dhaka", "tangail").is_some());
        assert!(find_district("Dhaka", "Tangail").is_some());
    }

    #[test]
    fn lookup_by_bangla_name() {
        let coords = district_coordinates("ঢাকা", "ঢাকা").unwrap();
        assert!(coords.latitude > Decimal::from(23) && coords.latitude < Decimal::from(24));
    }

    #[test]
    fn unknown_district_is_none() {
        assert!(find_district("Dhaka", "Chattogram").is_none());
        assert!(district_coordinates("Nowhere", "Dhaka").is_none());
    }
}
