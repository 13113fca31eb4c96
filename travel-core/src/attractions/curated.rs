//! Built-in attractions for a handful of well-known cities, used when every
//! live source comes back empty.

#[derive(Debug)]
pub struct CuratedAttraction {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub url: &'static str,
}

struct CuratedCity {
    names: &'static [&'static str], // lowercased canonical + aliases
    attractions: &'static [CuratedAttraction],
}

const CURATED_CITIES: &[CuratedCity] = &[
    CuratedCity {
        names: &["paris"],
        attractions: &[
            CuratedAttraction {
                slug: "paris-eiffel-tower",
                title: "Eiffel Tower",
                summary: "Wrought-iron lattice tower on the Champ de Mars, built for the 1889 World's Fair and now the city's best-known landmark.",
                url: "https://en.wikipedia.org/wiki/Eiffel_Tower",
            },
            CuratedAttraction {
                slug: "paris-louvre",
                title: "Louvre",
                summary: "The world's most-visited art museum, housed in a former royal palace on the Right Bank of the Seine.",
                url: "https://en.wikipedia.org/wiki/Louvre",
            },
            CuratedAttraction {
                slug: "paris-sacre-coeur",
                title: "Sacré-Cœur",
                summary: "Romano-Byzantine basilica at the summit of Montmartre with sweeping views over the city.",
                url: "https://en.wikipedia.org/wiki/Sacr%C3%A9-C%C5%93ur,_Paris",
            },
        ],
    },
    CuratedCity {
        names: &["london"],
        attractions: &[
            CuratedAttraction {
                slug: "london-tower",
                title: "Tower of London",
                summary: "Historic castle on the north bank of the Thames, home of the Crown Jewels.",
                url: "https://en.wikipedia.org/wiki/Tower_of_London",
            },
            CuratedAttraction {
                slug: "london-british-museum",
                title: "British Museum",
                summary: "Public museum of human history, art and culture with a permanent collection of some eight million works.",
                url: "https://en.wikipedia.org/wiki/British_Museum",
            },
            CuratedAttraction {
                slug: "london-westminster",
                title: "Palace of Westminster",
                summary: "Meeting place of the UK Parliament, known for the clock tower housing Big Ben.",
                url: "https://en.wikipedia.org/wiki/Palace_of_Westminster",
            },
        ],
    },
    CuratedCity {
        names: &["new york", "new york city", "nyc"],
        attractions: &[
            CuratedAttraction {
                slug: "nyc-central-park",
                title: "Central Park",
                summary: "Urban park between the Upper West and Upper East Sides of Manhattan.",
                url: "https://en.wikipedia.org/wiki/Central_Park",
            },
            CuratedAttraction {
                slug: "nyc-statue-of-liberty",
                title: "Statue of Liberty",
                summary: "Colossal neoclassical sculpture on Liberty Island in New York Harbor, a gift from France in 1886.",
                url: "https://en.wikipedia.org/wiki/Statue_of_Liberty",
            },
            CuratedAttraction {
                slug: "nyc-met",
                title: "Metropolitan Museum of Art",
                summary: "The largest art museum in the Americas, on the eastern edge of Central Park.",
                url: "https://en.wikipedia.org/wiki/Metropolitan_Museum_of_Art",
            },
        ],
    },
    CuratedCity {
        names: &["tokyo"],
        attractions: &[
            CuratedAttraction {
                slug: "tokyo-senso-ji",
                title: "Sensō-ji",
                summary: "Ancient Buddhist temple in Asakusa and the oldest temple in Tokyo.",
                url: "https://en.wikipedia.org/wiki/Sens%C5%8D-ji",
            },
            CuratedAttraction {
                slug: "tokyo-meiji-jingu",
                title: "Meiji Shrine",
                summary: "Shinto shrine dedicated to Emperor Meiji, set in a forest next to Yoyogi Park.",
                url: "https://en.wikipedia.org/wiki/Meiji_Shrine",
            },
            CuratedAttraction {
                slug: "tokyo-skytree",
                title: "Tokyo Skytree",
                summary: "Broadcasting and observation tower in Sumida, the tallest structure in Japan.",
                url: "https://en.wikipedia.org/wiki/Tokyo_Skytree",
            },
        ],
    },
    CuratedCity {
        names: &["rome", "roma"],
        attractions: &[
            CuratedAttraction {
                slug: "rome-colosseum",
                title: "Colosseum",
                summary: "Elliptical amphitheatre in the centre of the city, the largest ever built in the Roman Empire.",
                url: "https://en.wikipedia.org/wiki/Colosseum",
            },
            CuratedAttraction {
                slug: "rome-pantheon",
                title: "Pantheon",
                summary: "Former Roman temple, now a church, with the world's largest unreinforced concrete dome.",
                url: "https://en.wikipedia.org/wiki/Pantheon,_Rome",
            },
            CuratedAttraction {
                slug: "rome-trevi",
                title: "Trevi Fountain",
                summary: "Eighteenth-century Baroque fountain in the Trevi district, the largest in the city.",
                url: "https://en.wikipedia.org/wiki/Trevi_Fountain",
            },
        ],
    },
];

/// Curated attractions for a place name, matched case-insensitively.
pub fn lookup(place_name: &str) -> &'static [CuratedAttraction] {
    let key = place_name.trim().to_lowercase();
    CURATED_CITIES
        .iter()
        .find(|city| city.names.contains(&key.as_str()))
        .map(|city| city.attractions)
        .unwrap_or(&[])
}
