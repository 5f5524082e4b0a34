mod pokemon;
