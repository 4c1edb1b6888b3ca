//! Built-in technology ontology.
//!
//! Each row is `(canonical, aliases)`. A canonical name may appear under more than one
//! category; its aliases are only listed once.

use crate::extraction::ontology::Category;

pub type TermRow = (&'static str, &'static [&'static str]);

pub const BUILTIN_TERMS: &[(Category, &[TermRow])] = &[
    (
        Category::Language,
        &[
            ("python", &["python3", "python 3", "py"]),
            ("java", &[]),
            ("javascript", &["js", "ecmascript", "es6", "java script"]),
            ("typescript", &["ts", "type script"]),
            ("c", &[]),
            ("c++", &["cpp", "c plus plus"]),
            ("c#", &["csharp", "c sharp"]),
            ("go", &["golang", "go lang"]),
            ("rust", &["rust lang"]),
            ("ruby", &[]),
            ("php", &[]),
            ("swift", &[]),
            ("kotlin", &[]),
            ("scala", &[]),
            ("r", &[]),
            ("perl", &[]),
            ("matlab", &[]),
            ("sql", &[]),
            ("html", &["html5"]),
            ("css", &["css3"]),
        ],
    ),
    (
        Category::Framework,
        &[
            ("react", &["reactjs", "react js", "react.js"]),
            ("react native", &[]),
            ("angular", &["angularjs", "angular.js", "angular js"]),
            ("vue", &["vuejs", "vue js", "vue.js"]),
            ("svelte", &["sveltejs"]),
            ("next.js", &["nextjs", "next js"]),
            ("nuxt.js", &["nuxtjs", "nuxt js", "nuxt"]),
            ("gatsby", &[]),
            ("ember", &["ember.js", "emberjs"]),
            ("backbone", &["backbone.js", "backbonejs"]),
            ("django", &[]),
            ("flask", &[]),
            ("fastapi", &["fast api"]),
            ("spring", &["spring framework"]),
            ("spring boot", &["springboot"]),
            ("rails", &["ruby on rails"]),
            ("dotnet", &[".net", "asp.net", "asp net"]),
            ("express", &["expressjs", "express js", "express.js"]),
            ("laravel", &[]),
            ("symfony", &[]),
        ],
    ),
    (
        Category::Library,
        &[
            ("redux", &[]),
            ("mobx", &[]),
            ("recoil", &[]),
            ("zustand", &[]),
            ("tensorflow", &["tf"]),
            ("pytorch", &[]),
            ("keras", &[]),
            ("scikit learn", &["sklearn", "scikit-learn"]),
            ("pandas", &[]),
            ("numpy", &[]),
            ("scipy", &[]),
            ("matplotlib", &[]),
            ("seaborn", &[]),
            ("plotly", &[]),
            ("xgboost", &[]),
            ("lightgbm", &[]),
            ("apollo", &[]),
            ("prisma", &[]),
            ("typeorm", &[]),
            ("sequelize", &[]),
            ("mongoose", &[]),
            ("sqlalchemy", &[]),
            ("hibernate", &[]),
            ("entity framework", &[]),
            ("sass", &["scss"]),
            ("less", &[]),
            ("tailwind", &["tailwindcss", "tailwind css"]),
            ("bootstrap", &[]),
            ("material ui", &["mui", "material-ui"]),
            ("chakra ui", &[]),
            ("ant design", &[]),
        ],
    ),
    (
        Category::Database,
        &[
            ("mysql", &[]),
            ("postgresql", &["postgres"]),
            ("mongodb", &["mongo", "mongo db"]),
            ("redis", &[]),
            ("cassandra", &[]),
            ("dynamodb", &[]),
            ("oracle", &[]),
            ("sqlite", &["sqlite3"]),
            ("mariadb", &[]),
            ("mssql", &["sql server"]),
            ("elasticsearch", &["elastic", "elastic search"]),
            ("couchdb", &[]),
            ("neo4j", &[]),
            ("firebase", &[]),
        ],
    ),
    (
        Category::CloudTool,
        &[
            ("aws", &["amazon web services"]),
            ("azure", &["microsoft azure"]),
            ("gcp", &["google cloud", "google cloud platform"]),
            ("docker", &[]),
            ("kubernetes", &["k8s"]),
            ("lambda", &["aws lambda"]),
            ("terraform", &[]),
            ("heroku", &[]),
            ("firebase", &[]),
        ],
    ),
    (
        Category::DevTool,
        &[
            ("postman", &[]),
            ("insomnia", &[]),
            ("swagger", &["openapi"]),
            ("chrome devtools", &[]),
            ("vscode", &["visual studio code"]),
            ("intellij", &[]),
            ("pycharm", &[]),
            ("eclipse", &[]),
            ("vim", &[]),
            ("emacs", &[]),
            ("figma", &[]),
            ("sketch", &[]),
            ("adobe xd", &[]),
            ("photoshop", &[]),
            ("illustrator", &[]),
            ("jira", &[]),
            ("confluence", &[]),
            ("trello", &[]),
            ("asana", &[]),
            ("jenkins", &[]),
            ("tableau", &[]),
            ("power bi", &["powerbi"]),
            ("looker", &[]),
            ("excel", &["ms excel", "microsoft excel"]),
            ("metabase", &[]),
            ("superset", &[]),
            ("hadoop", &[]),
            ("spark", &["apache spark"]),
            ("kafka", &["apache kafka"]),
            ("airflow", &["apache airflow"]),
            ("flink", &[]),
        ],
    ),
    (
        Category::BuildTool,
        &[
            ("webpack", &[]),
            ("vite", &[]),
            ("rollup", &[]),
            ("parcel", &[]),
            ("babel", &[]),
            ("esbuild", &[]),
            ("npm", &[]),
            ("yarn", &[]),
            ("pip", &[]),
            ("maven", &[]),
            ("gradle", &[]),
            ("composer", &[]),
            ("cargo", &[]),
            ("nuget", &[]),
        ],
    ),
    (
        Category::VcsTool,
        &[
            ("git", &[]),
            ("github", &[]),
            ("gitlab", &[]),
            ("bitbucket", &[]),
            ("svn", &[]),
            ("mercurial", &[]),
        ],
    ),
    (
        Category::TestTool,
        &[
            ("jest", &[]),
            ("pytest", &[]),
            ("junit", &[]),
            ("mocha", &[]),
            ("chai", &[]),
            ("selenium", &[]),
            ("cypress", &[]),
            ("playwright", &[]),
        ],
    ),
    (
        Category::Concept,
        &[
            ("node.js", &["nodejs", "node js", "node"]),
            ("machine learning", &["ml"]),
            ("deep learning", &["dl"]),
            ("neural networks", &["neural network"]),
            ("artificial intelligence", &["ai"]),
            ("natural language processing", &["nlp"]),
            ("computer vision", &[]),
            ("predictive modeling", &[]),
            ("data mining", &[]),
            ("data analysis", &["data analytics"]),
            ("data visualization", &["data viz", "dataviz"]),
            ("exploratory data analysis", &["eda"]),
            ("etl", &["data pipeline"]),
            ("rest api", &["rest", "restful", "rest apis"]),
            ("graphql", &[]),
            ("grpc", &[]),
            ("websocket", &["websockets"]),
            ("oauth", &["oauth2"]),
            ("jwt", &["json web token"]),
            ("microservices", &["microservice"]),
        ],
    ),
];

/// Surfaces that double as everyday English words; they only count inside a skills section.
pub const AMBIGUOUS_SURFACES: &[&str] = &[
    "go", "r", "c", "py", "ts", "tf", "dl", "rest", "less", "swift", "excel", "sketch", "chai",
    "parcel", "composer", "elastic", "spring", "lambda", "apollo", "recoil", "eclipse",
];
